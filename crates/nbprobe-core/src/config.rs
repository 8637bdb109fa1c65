//! Probe configuration.
//!
//! The probe reads no configuration files and no environment variables; the
//! only inputs are CLI flags, and with none given the defaults reproduce the
//! classic `/dev/null` check.

use nbprobe_common::OutputFormat;
use std::path::PathBuf;

/// Path opened by the probe unless overridden.
pub const DEFAULT_REFERENCE_PATH: &str = "/dev/null";

/// Settings for a single probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Path opened read-only in the first step.
    pub reference_path: PathBuf,
    /// Rendering of the constants on success.
    pub format: OutputFormat,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            reference_path: PathBuf::from(DEFAULT_REFERENCE_PATH),
            format: OutputFormat::Plain,
        }
    }
}

impl ProbeConfig {
    /// Set the reference path.
    pub fn with_reference_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference_path = path.into();
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}
