//! Output formats for a successful probe.

use crate::constants::PlatformConstants;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Supported renderings of a successful probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Three space-separated integers, no trailing newline (the build-script contract)
    #[default]
    Plain,

    /// Single JSON object followed by a newline
    Json,

    /// `const` declarations suitable for `include!` from a build script
    Rust,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Rust => write!(f, "rust"),
        }
    }
}

/// Render constants in the requested format.
pub fn render(constants: &PlatformConstants, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Plain => Ok(constants.to_string()),
        OutputFormat::Json => {
            let mut out = serde_json::to_string(constants)?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Rust => Ok(render_rust_consts(constants)),
    }
}

/// Rust source declaring the three constants.
///
/// Types are fully qualified so the file can be included anywhere.
pub fn render_rust_consts(constants: &PlatformConstants) -> String {
    format!(
        concat!(
            "pub const STDIN_FILENO: ::core::ffi::c_int = {};\n",
            "pub const F_SETFL: ::core::ffi::c_int = {};\n",
            "pub const O_NONBLOCK: ::core::ffi::c_int = {};\n",
        ),
        constants.stdin_fileno, constants.f_setfl, constants.o_nonblock
    )
}
