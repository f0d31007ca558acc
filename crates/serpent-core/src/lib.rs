//! Serpent pipeline engine.
//!
//! A deterministic, multi-stage transformation pipeline over 16-bit words:
//! three transformers built from primitive bit operations, a crowned-prime
//! stage of keyed XORs, a resampling stage that redraws every bit from an
//! injected entropy source, and a final reflection.
//!
//! # Design
//!
//! The crate is Sans-IO. Stages are pure functions of their input word (and,
//! for resampling, of the [`Entropy`] handed to them). Every stage returns
//! its result together with [`TraceRecord`]s describing what it did; nothing
//! in here logs on its own. Callers decide whether to hand the records to
//! [`trace::emit`].
//!
//! # Invariants
//!
//! - Width: every stage maps `[0, 0xFFFF]` into `[0, 0xFFFF]`
//! - Immutability: a [`PipelineConfig`] is never mutated after construction
//! - Determinism: given the same [`Entropy`] state, [`Pipeline::run`] returns
//!   the same word and the same trace

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod config;
pub mod crown;
pub mod entropy;
pub mod error;
pub mod ops;
pub mod pipeline;
pub mod resample;
pub mod trace;
pub mod transformer;

pub use codec::{decode_word, encode_word};
pub use config::{KEY_333, KEY_555, KEY_AAA, PipelineConfig};
pub use crown::{CrownedPrime, apply_crowns};
pub use entropy::{Entropy, FixedEntropy, Reproducibility};
pub use error::{ConfigError, DecodeError};
pub use ops::{Operation, Reflector, WORD_BITS, Word};
pub use pipeline::{Pipeline, PipelineRun};
pub use resample::ResamplingStage;
pub use trace::{Channel, Stage, TraceRecord};
pub use transformer::Transformer;
