//! Probe implementation.

use super::control::{Fcntl, FlagControl};
use crate::config::ProbeConfig;
use crate::exit_codes::ExitCode;
use nbprobe_common::PlatformConstants;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::os::fd::{AsFd, AsRawFd};
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Status line printed to stdout when the reference path cannot be opened.
pub const OPEN_FAILED_STATUS: &str = "failed to open test file";

/// Status line printed to stdout when `fcntl` is rejected.
pub const CONTROL_FAILED_STATUS: &str = "failed to execute fcntl";

/// Which probe step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeErrorKind {
    OpenFailed,
    ControlFailed,
}

/// Errors during the probe. Both are terminal.
///
/// The `Display` text is the system diagnostic (call plus OS error); the
/// fixed line for stdout comes from [`ProbeError::status_line`].
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("open(\"{}\"): {source}", .path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("fcntl(fd, F_SETFL, O_NONBLOCK): {source}")]
    ControlFailed {
        #[source]
        source: io::Error,
    },
}

impl ProbeError {
    pub fn kind(&self) -> ProbeErrorKind {
        match self {
            ProbeError::OpenFailed { .. } => ProbeErrorKind::OpenFailed,
            ProbeError::ControlFailed { .. } => ProbeErrorKind::ControlFailed,
        }
    }

    /// Fixed text for stdout, consumed by whatever invoked the probe.
    pub fn status_line(&self) -> &'static str {
        match self {
            ProbeError::OpenFailed { .. } => OPEN_FAILED_STATUS,
            ProbeError::ControlFailed { .. } => CONTROL_FAILED_STATUS,
        }
    }

    /// perror-style message for stderr.
    pub fn diagnostic(&self) -> String {
        self.to_string()
    }

    /// The underlying OS error.
    pub fn os_error(&self) -> &io::Error {
        match self {
            ProbeError::OpenFailed { source, .. } | ProbeError::ControlFailed { source } => source,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::Unsupported
    }
}

/// Checks that a path can be opened and its descriptor made non-blocking.
#[derive(Debug, Clone)]
pub struct Probe<C = Fcntl> {
    reference_path: PathBuf,
    control: C,
}

impl Probe<Fcntl> {
    /// Probe using the real `fcntl` call.
    pub fn new(config: &ProbeConfig) -> Self {
        Self::with_control(config, Fcntl)
    }
}

impl<C: FlagControl> Probe<C> {
    /// Probe using a custom flag-control step.
    pub fn with_control(config: &ProbeConfig, control: C) -> Self {
        Self {
            reference_path: config.reference_path.clone(),
            control,
        }
    }

    /// Run both steps in order and return the host's constants.
    ///
    /// The descriptor is closed when this returns, on every path.
    pub fn run(&self) -> Result<PlatformConstants, ProbeError> {
        let file = self.open_reference()?;
        self.set_nonblocking(&file)?;

        let constants = PlatformConstants::host();
        debug!(
            stdin_fileno = constants.stdin_fileno,
            f_setfl = constants.f_setfl,
            o_nonblock = constants.o_nonblock,
            "non-blocking capability confirmed"
        );
        Ok(constants)
    }

    fn open_reference(&self) -> Result<File, ProbeError> {
        debug!(path = %self.reference_path.display(), "opening reference path");
        let file = File::open(&self.reference_path).map_err(|source| ProbeError::OpenFailed {
            path: self.reference_path.clone(),
            source,
        })?;
        debug!(fd = file.as_raw_fd(), "reference path opened");
        Ok(file)
    }

    fn set_nonblocking(&self, file: &File) -> Result<(), ProbeError> {
        debug!(fd = file.as_raw_fd(), "setting O_NONBLOCK via F_SETFL");
        self.control
            .set_nonblocking(file.as_fd())
            .map_err(|source| ProbeError::ControlFailed { source })
    }
}

/// Run the probe described by `config` with the real `fcntl` call.
pub fn run_probe(config: &ProbeConfig) -> Result<PlatformConstants, ProbeError> {
    Probe::new(config).run()
}
