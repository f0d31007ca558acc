//! Verification harness for the serpent pipeline.
//!
//! Drives a scripted exchange between two logical agents, A and B, who both
//! answer by running the same [`Pipeline`](serpent_core::Pipeline). Each
//! step is checked in two directions and the run stops at the first
//! mismatch.
//!
//! # Determinism
//!
//! The pipeline's resampling stage draws from an [`Entropy`] source. Scripts
//! record the source their expected values were computed under; replaying
//! with [`SeededEntropy`] and the same seed reproduces every draw. A failure
//! under a different or unseeded source is reported as
//! [`FailureCause::NonReproducible`] rather than as a logic fault.
//!
//! [`Entropy`]: serpent_core::Entropy

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod agent;
pub mod error;
pub mod report;
pub mod script;
pub mod seeded;
pub mod verifier;

pub use agent::{Agent, AgentRole, Response, transform_batch};
pub use error::HarnessError;
pub use report::{
    Direction, FailureCause, HarnessEvent, StepFailure, Verdict, VerificationReport,
};
pub use script::{ExchangeScript, ExchangeStep};
pub use seeded::SeededEntropy;
pub use verifier::Verifier;
