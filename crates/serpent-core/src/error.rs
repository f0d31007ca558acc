//! Core error types.

use thiserror::Error;

/// Errors from decoding a hex-encoded word.
///
/// Decoding never falls back to a default value: anything that is not
/// exactly four hex digits is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// Input is not four characters long.
    #[error("expected 4 hex digits, got {len} characters in {input:?}")]
    WrongLength {
        /// The rejected input.
        input: String,
        /// Its length in characters.
        len: usize,
    },

    /// Input contains a character that is not a hex digit.
    #[error("invalid hex word {input:?}: {source}")]
    InvalidHex {
        /// The rejected input.
        input: String,
        /// Underlying hex decoding failure.
        source: hex::FromHexError,
    },
}

/// Errors from building a custom [`PipelineConfig`](crate::PipelineConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A crowned-prime entry carries a number that is not prime.
    #[error("crowned prime {prime} is not prime")]
    NotPrime {
        /// The offending value.
        prime: u16,
    },

    /// Resampling probability outside `[0, 1]`.
    #[error("resampling probability {probability} is outside [0, 1]")]
    InvalidProbability {
        /// The offending probability.
        probability: f64,
    },
}
