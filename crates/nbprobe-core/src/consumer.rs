//! Running the probe from a build or configuration script.
//!
//! A build script compiles or locates the `nbprobe` binary, runs it, and
//! either records the three constants or stops the build with the probe's
//! diagnostic:
//!
//! ```ignore
//! let constants = nbprobe_core::consumer::invoke(&probe_path)?;
//! let out = PathBuf::from(env::var("OUT_DIR")?).join("nonblock_consts.rs");
//! nbprobe_core::consumer::write_consts(&out, &constants)?;
//! ```

use nbprobe_common::output::render_rust_consts;
use nbprobe_common::{ParseError, PlatformConstants};
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};
use thiserror::Error;
use tracing::debug;

/// Errors while running the probe or reading its output.
#[derive(Debug, Error)]
pub enum ConsumeError {
    #[error("failed to run probe: {0}")]
    Spawn(#[from] io::Error),

    #[error("probe reported failure ({status}): {}", .stdout.trim_end())]
    Failed {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },

    #[error("invalid output from probe: {output:?}")]
    Parse {
        output: String,
        #[source]
        source: ParseError,
    },
}

impl ConsumeError {
    /// The probe's own diagnostic, when it ran and failed.
    pub fn probe_stderr(&self) -> Option<&str> {
        match self {
            ConsumeError::Failed { stderr, .. } => Some(stderr.as_str()),
            _ => None,
        }
    }
}

/// Run the probe binary at `probe` with no arguments.
pub fn invoke(probe: &Path) -> Result<PlatformConstants, ConsumeError> {
    invoke_command(Command::new(probe))
}

/// Run a prepared probe command and parse its success line.
pub fn invoke_command(mut command: Command) -> Result<PlatformConstants, ConsumeError> {
    debug!(command = ?command, "running probe");
    let output = command.output()?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

    if !output.status.success() {
        return Err(ConsumeError::Failed {
            status: output.status,
            stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    stdout
        .parse::<PlatformConstants>()
        .map_err(|source| ConsumeError::Parse {
            output: stdout.clone(),
            source,
        })
}

/// Write the constants as Rust `const` items for `include!`.
pub fn write_consts(path: &Path, constants: &PlatformConstants) -> io::Result<()> {
    std::fs::write(path, render_rust_consts(constants))
}
