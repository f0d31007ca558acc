//! CLI error types.

use serpent_core::DecodeError;
use thiserror::Error;

/// Errors that end the program before a verdict is reached.
#[derive(Debug, Error)]
pub enum CliError {
    /// A word argument was malformed.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Reading stdin failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The size read from stdin is not an integer.
    #[error("size must be an integer, got {input:?}")]
    InvalidSize {
        /// The rejected input, trimmed.
        input: String,
    },
}
