//! nbprobe core library
//!
//! This library provides the pieces behind the `nbprobe` binary:
//! - The capability probe (open a reference path, set `O_NONBLOCK` via `fcntl`)
//! - Exit codes and result reporting for the CLI
//! - Probe configuration and logging setup
//! - A consumer for build scripts that run the probe and read its output
//!
//! The binary entry point is in `main.rs`.

#[cfg(not(unix))]
compile_error!("nbprobe only supports Unix targets (it exercises open(2) and fcntl(2))");

pub mod config;
pub mod consumer;
pub mod exit_codes;
pub mod logging;
pub mod probe;
pub mod report;

pub use nbprobe_common::{OutputFormat, PlatformConstants};
