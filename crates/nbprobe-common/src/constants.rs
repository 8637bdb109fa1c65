//! The platform constants reported by the probe.
//!
//! Values are taken from the `libc` bindings for the compilation target and
//! are never written down as literals here: they differ between platforms
//! (`O_NONBLOCK` is 2048 on Linux x86_64 but 4 on macOS, for example).

use crate::error::{ParseError, FIELD_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Standard-input descriptor number, `F_SETFL` command and `O_NONBLOCK` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformConstants {
    /// Descriptor number of standard input (`STDIN_FILENO`).
    pub stdin_fileno: i32,

    /// The "set file status flags" fcntl command (`F_SETFL`).
    pub f_setfl: i32,

    /// The non-blocking status flag bit (`O_NONBLOCK`).
    pub o_nonblock: i32,
}

impl PlatformConstants {
    /// Build from explicit values (e.g. values read back from a probe run).
    pub const fn new(stdin_fileno: i32, f_setfl: i32, o_nonblock: i32) -> Self {
        Self {
            stdin_fileno,
            f_setfl,
            o_nonblock,
        }
    }

    /// Constants of the platform this crate was compiled for.
    #[cfg(unix)]
    pub fn host() -> Self {
        Self::new(libc::STDIN_FILENO, libc::F_SETFL, libc::O_NONBLOCK)
    }

    /// Values in wire order.
    pub fn as_array(&self) -> [i32; FIELD_COUNT] {
        [self.stdin_fileno, self.f_setfl, self.o_nonblock]
    }
}

/// Wire format: three decimal integers separated by single spaces, no newline.
impl fmt::Display for PlatformConstants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.stdin_fileno, self.f_setfl, self.o_nonblock)
    }
}

impl FromStr for PlatformConstants {
    type Err = ParseError;

    /// Parse a probe success line.
    ///
    /// A single trailing `\n` or `\r\n` is accepted; any other whitespace is
    /// part of a field and rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s
            .strip_suffix("\r\n")
            .or_else(|| s.strip_suffix('\n'))
            .unwrap_or(s);
        if line.is_empty() {
            return Err(ParseError::Empty);
        }

        let mut fields = line.split(' ');
        let mut values = [0i32; FIELD_COUNT];
        for (index, slot) in values.iter_mut().enumerate() {
            let field = fields.next().ok_or(ParseError::MissingField { index })?;
            *slot = parse_field(index, field)?;
        }
        if fields.next().is_some() {
            return Err(ParseError::TrailingField);
        }

        let [stdin_fileno, f_setfl, o_nonblock] = values;
        Ok(Self::new(stdin_fileno, f_setfl, o_nonblock))
    }
}

fn parse_field(index: usize, field: &str) -> Result<i32, ParseError> {
    // i32::from_str would also take a leading '+', which the probe never prints
    if field.starts_with('+') {
        return Err(invalid(index, field));
    }
    field.parse::<i32>().map_err(|_| invalid(index, field))
}

fn invalid(index: usize, field: &str) -> ParseError {
    ParseError::InvalidField {
        index,
        value: field.to_string(),
    }
}
