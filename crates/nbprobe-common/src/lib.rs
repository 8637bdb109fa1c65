//! nbprobe common types.
//!
//! This crate provides the pieces shared by the probe and its consumers:
//! - The three platform constants the probe reports
//! - The wire format (`<stdin-fd> <set-flags> <nonblocking>`) and its parser
//! - Output format selection and rendering

pub mod constants;
pub mod error;
pub mod output;

pub use constants::PlatformConstants;
pub use error::ParseError;
pub use output::{render, OutputFormat};
