//! Parse errors for domain identifiers.

use thiserror::Error;

/// Errors that can occur when parsing a domain identifier from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The value is not one of the known identifiers for this kind.
    #[error("unknown {kind}: {value}")]
    Unknown {
        /// What was being parsed (e.g. "condition").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}

impl ParseError {
    /// Create an [`ParseError::Unknown`] error.
    #[must_use]
    pub fn unknown(kind: &'static str, value: &str) -> Self {
        Self::Unknown {
            kind,
            value: value.to_owned(),
        }
    }
}
