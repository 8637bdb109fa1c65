//! Non-blocking capability probe.
//!
//! Two ordered steps, each fatal on failure:
//! 1. open the reference path read-only
//! 2. `fcntl(fd, F_SETFL, O_NONBLOCK)` on the descriptor from step 1
//!
//! On success the platform constants are returned for reporting.

mod control;
mod detect;

pub use control::{Fcntl, FlagControl};
pub use detect::{run_probe, Probe, ProbeError, ProbeErrorKind};
