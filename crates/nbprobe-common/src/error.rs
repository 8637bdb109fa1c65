//! Error types for reading the probe's wire format.

use thiserror::Error;

/// Number of fields in a probe success line.
pub const FIELD_COUNT: usize = 3;

/// Errors produced when a probe success line cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("probe output is empty")]
    Empty,

    #[error("probe output is missing field {index} (expected 3 fields)")]
    MissingField { index: usize },

    #[error("probe output has more than 3 fields")]
    TrailingField,

    #[error("probe output field {index} is not a decimal integer: {value:?}")]
    InvalidField { index: usize, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_value() {
        let err = ParseError::InvalidField {
            index: 0,
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "probe output field 0 is not a decimal integer: \"abc\""
        );
    }
}
