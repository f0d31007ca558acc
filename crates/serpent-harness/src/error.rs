//! Harness error types.

use serpent_core::{DecodeError, Reproducibility};
use thiserror::Error;

/// Errors from building or running an exchange.
///
/// A verification mismatch is not an error; it is reported through
/// [`Verdict::Failed`](crate::Verdict::Failed).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HarnessError {
    /// A hex-encoded word could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Expected values cannot be recorded from this entropy source.
    #[error("cannot calibrate under {source_kind} entropy: {reason}")]
    Calibration {
        /// Reproducibility of the rejected source.
        source_kind: Reproducibility,
        /// Why calibration was refused.
        reason: String,
    },
}
