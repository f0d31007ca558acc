//! Trace records produced by pipeline stages.
//!
//! Stages return records instead of logging. [`emit`] routes them to one of
//! two `tracing` targets:
//!
//! - [`MILESTONE_TARGET`]: stage boundaries and completed runs
//! - [`DETAIL_TARGET`]: per-operation before/after words
//!
//! Both channels are append-only and keep the order records were produced
//! in. They are diagnostics only; no caller should branch on them.

use std::fmt;

use crate::{Operation, Reflector, Word};

/// Target for structural milestones.
pub const MILESTONE_TARGET: &str = "serpent::milestone";

/// Target for step-by-step diagnostic detail.
pub const DETAIL_TARGET: &str = "serpent::detail";

/// Which trace channel a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Stage boundaries and verdicts.
    Milestone,
    /// Per-operation detail.
    Detail,
}

/// Pipeline stages in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// A named transformer.
    Transformer(String),
    /// The crowned-prime keyed XOR stage.
    CrownedPrimes,
    /// The per-bit resampling stage.
    Resampling,
    /// The final reflection.
    FinalReflection,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transformer(name) => f.write_str(name),
            Self::CrownedPrimes => f.write_str("crowned primes"),
            Self::Resampling => f.write_str("resampling"),
            Self::FinalReflection => f.write_str("final reflection"),
        }
    }
}

/// One observable event inside a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceRecord {
    /// A stage is about to run on `word`.
    StageEntered {
        /// The stage.
        stage: Stage,
        /// Word entering the stage.
        word: Word,
    },

    /// A transformer applied one of its operations.
    OperationApplied {
        /// Transformer name.
        transformer: String,
        /// Position of the operation within the transformer.
        index: usize,
        /// The operation.
        operation: Operation,
        /// Word before the operation.
        before: Word,
        /// Word after the operation.
        after: Word,
    },

    /// A crowned prime applied its keyed XOR.
    CrownApplied {
        /// The prime.
        prime: u16,
        /// The weight.
        weight: Word,
        /// Derived XOR key, `prime * weight` wrapped to 16 bits.
        key: Word,
        /// Word before the XOR.
        before: Word,
        /// Word after the XOR.
        after: Word,
    },

    /// The resampling stage redrew every bit.
    Resampled {
        /// Word before resampling.
        before: Word,
        /// Freshly measured word.
        after: Word,
    },

    /// A reflector was applied outside a transformer.
    Reflected {
        /// The reflector.
        reflector: Reflector,
        /// Word before reflection.
        before: Word,
        /// Word after reflection.
        after: Word,
    },

    /// The pipeline finished.
    Completed {
        /// Word the run started with.
        input: Word,
        /// Word the run produced.
        output: Word,
    },
}

impl TraceRecord {
    /// Channel the record is emitted on.
    pub fn channel(&self) -> Channel {
        match self {
            Self::StageEntered { .. } | Self::Completed { .. } => Channel::Milestone,
            Self::OperationApplied { .. }
            | Self::CrownApplied { .. }
            | Self::Resampled { .. }
            | Self::Reflected { .. } => Channel::Detail,
        }
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StageEntered { stage, word } => {
                write!(f, "applying {stage} to {word:016b} ({word:04x})")
            },
            Self::OperationApplied { transformer, index, operation, before, after } => {
                write!(f, "{transformer}[{index}] {operation}: {before:016b} -> {after:016b}")
            },
            Self::CrownApplied { prime, weight, key, before, after } => {
                write!(
                    f,
                    "crowned prime {prime} * 0x{weight:04x} = 0x{key:04x}: {before:016b} -> {after:016b}"
                )
            },
            Self::Resampled { before, after } => {
                write!(f, "resampled: {before:016b} -> {after:016b}")
            },
            Self::Reflected { reflector, before, after } => {
                write!(f, "reflect({reflector}): {before:016b} -> {after:016b} ({after:04x})")
            },
            Self::Completed { input, output } => {
                write!(f, "pipeline complete: {input:04x} -> {output:04x}")
            },
        }
    }
}

/// Emit one message on `channel`.
///
/// Milestones go out at `info` on [`MILESTONE_TARGET`], detail at `debug` on
/// [`DETAIL_TARGET`].
pub fn emit_on(channel: Channel, message: &dyn fmt::Display) {
    match channel {
        Channel::Milestone => tracing::info!(target: MILESTONE_TARGET, "{message}"),
        Channel::Detail => tracing::debug!(target: DETAIL_TARGET, "{message}"),
    }
}

/// Emit records to their `tracing` channels, in order.
pub fn emit(records: &[TraceRecord]) {
    for record in records {
        emit_on(record.channel(), record);
    }
}
