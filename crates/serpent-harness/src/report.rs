//! Verification outcomes and the harness event log.

use std::fmt;

use serpent_core::{Channel, Reproducibility, TraceRecord};

use crate::AgentRole;

/// Which check of a step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// B's answer to A's outbound word.
    Response,
    /// A's replay of the expected send, compared with the outbound word.
    Replay,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Response => f.write_str("B's response"),
            Self::Replay => f.write_str("A's replay"),
        }
    }
}

/// Why a check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// The run reproduced the script's entropy, so the pipeline disagrees
    /// with the script.
    Mismatch,

    /// The resampling stage drew from a source the expected values were not
    /// computed under. Correct pipelines fail this way too.
    NonReproducible {
        /// Source the script was calibrated under, if known.
        recorded: Option<Reproducibility>,
        /// Source active during verification.
        active: Reproducibility,
    },
}

impl FailureCause {
    /// Classify a failed check from the recorded and active sources.
    pub fn classify(recorded: Option<Reproducibility>, active: Reproducibility) -> Self {
        let reproduced = match recorded {
            Some(recorded) => recorded == active,
            None => active.is_reproducible(),
        };

        if reproduced && active.is_reproducible() {
            Self::Mismatch
        } else {
            Self::NonReproducible { recorded, active }
        }
    }
}

/// A structured verification failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    /// 1-based step number.
    pub step: usize,
    /// Which check failed.
    pub direction: Direction,
    /// Expected hex word.
    pub expected: String,
    /// Actual hex word.
    pub actual: String,
    /// Why it failed.
    pub cause: FailureCause,
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step {}: {} mismatch: expected {}, got {}",
            self.step, self.direction, self.expected, self.actual
        )?;
        match self.cause {
            FailureCause::Mismatch => Ok(()),
            FailureCause::NonReproducible { recorded: Some(recorded), active } => write!(
                f,
                " (non-deterministic stage active: expected values computed under {recorded}, running with {active})"
            ),
            FailureCause::NonReproducible { recorded: None, active } => write!(
                f,
                " (non-deterministic stage active: running with {active})"
            ),
        }
    }
}

/// Final verdict of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Every step matched in both directions.
    Verified {
        /// Steps verified.
        steps: usize,
    },
    /// The first failing check. Later steps were not evaluated.
    Failed(StepFailure),
}

impl Verdict {
    /// Whether every step verified.
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    /// The failure, if any.
    pub fn failure(&self) -> Option<&StepFailure> {
        match self {
            Self::Verified { .. } => None,
            Self::Failed(failure) => Some(failure),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verified { steps } => write!(f, "all {steps} steps verified for both agents"),
            Self::Failed(failure) => write!(f, "verification failed at {failure}"),
        }
    }
}

/// Everything observable during a run, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarnessEvent {
    /// A step began.
    StepStarted {
        /// 1-based step number.
        step: usize,
    },
    /// An agent sent a message.
    Sent {
        /// Sender.
        from: AgentRole,
        /// Receiver.
        to: AgentRole,
        /// Hex-encoded word.
        message: String,
    },
    /// A pipeline record from an agent's run.
    Pipeline {
        /// Agent whose pipeline produced the record.
        agent: AgentRole,
        /// The record.
        record: TraceRecord,
    },
    /// An agent answered.
    Responded {
        /// Agent that answered.
        agent: AgentRole,
        /// Hex-encoded answer.
        message: String,
    },
    /// A comparison was made.
    Checked {
        /// 1-based step number.
        step: usize,
        /// Which check.
        direction: Direction,
        /// Expected hex word.
        expected: String,
        /// Actual hex word.
        actual: String,
    },
    /// Both checks of a step passed.
    StepVerified {
        /// 1-based step number.
        step: usize,
    },
}

impl HarnessEvent {
    /// Channel the event is emitted on.
    pub fn channel(&self) -> Channel {
        match self {
            Self::StepStarted { .. } | Self::StepVerified { .. } => Channel::Milestone,
            Self::Pipeline { record, .. } => record.channel(),
            Self::Sent { .. } | Self::Responded { .. } | Self::Checked { .. } => Channel::Detail,
        }
    }

    /// Step number, for events that belong to exactly one step.
    pub fn step(&self) -> Option<usize> {
        match self {
            Self::StepStarted { step }
            | Self::StepVerified { step }
            | Self::Checked { step, .. } => Some(*step),
            Self::Sent { .. } | Self::Pipeline { .. } | Self::Responded { .. } => None,
        }
    }
}

impl fmt::Display for HarnessEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StepStarted { step } => write!(f, "--- step {step} ---"),
            Self::Sent { from, to, message } if from == to => {
                write!(f, "agent {from} replays: {message}")
            },
            Self::Sent { from, to, message } => write!(f, "agent {from} sends to agent {to}: {message}"),
            Self::Pipeline { agent, record } => write!(f, "[{agent}] {record}"),
            Self::Responded { agent, message } => write!(f, "agent {agent} responds with: {message}"),
            Self::Checked { step, direction, expected, actual } => {
                write!(f, "step {step}: {direction}: expected {expected}, got {actual}")
            },
            Self::StepVerified { step } => write!(f, "step {step}: both agents verified"),
        }
    }
}

/// Result of a verification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    /// The verdict. The only thing callers should branch on.
    pub verdict: Verdict,
    /// Steps started before the run ended.
    pub steps_evaluated: usize,
    /// Ordered event log, for diagnostics.
    pub events: Vec<HarnessEvent>,
}
