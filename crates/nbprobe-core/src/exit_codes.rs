//! Exit codes for the nbprobe CLI.
//!
//! Build scripts branch on the exit status before reading stdout, so these
//! values are a stable contract:
//! - 0: capability confirmed
//! - 1: capability check failed (open or fcntl)
//! - 2: invalid command-line usage (clap's own status)
//! - 3: the result could not be written to stdout

/// Exit codes for nbprobe runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The reference path opened and accepted `F_SETFL`/`O_NONBLOCK`.
    Confirmed = 0,

    /// Either probe step failed.
    Unsupported = 1,

    /// Invalid arguments.
    ArgsError = 2,

    /// Writing the result failed (e.g. closed stdout).
    IoError = 3,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates a confirmed capability.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Confirmed)
    }

    /// Get the code name as a string constant (for JSON logs).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Confirmed => "OK_CONFIRMED",
            ExitCode::Unsupported => "ERR_UNSUPPORTED",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
