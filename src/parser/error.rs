//! Parse-driver error type.

use thiserror::Error;

/// Why [`super::driver::parse`] failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("input exceeds the maximum length of {limit} bytes ({actual} bytes given)")]
    InputTooLong { limit: usize, actual: usize },

    #[error("no grammar rule matched at position {position}")]
    NoMatch { position: usize },

    #[error("{remainder:?} was not consumed after a successful parse (trailing garbage at position {position})")]
    TrailingInput { position: usize, remainder: String },
}
