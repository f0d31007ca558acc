//! The verification run.
//!
//! For each step, in order:
//!
//! 1. A sends the outbound word to B.
//! 2. B answers by running the pipeline; the answer must equal the expected
//!    response.
//! 3. A replays the expected send through the same pipeline; the replay must
//!    equal the outbound word.
//!
//! The run is an ordered fold that stops at the first failed check. Both
//! agents draw from one entropy stream, B before A within each step.

use serpent_core::{
    Entropy, Pipeline, Reproducibility, encode_word,
    trace::{self, MILESTONE_TARGET},
};

use crate::{
    Agent, AgentRole, Direction, ExchangeScript, FailureCause, HarnessEvent, StepFailure, Verdict,
    VerificationReport,
};

/// Append-only event log that mirrors every event to `tracing`.
#[derive(Default)]
struct EventLog {
    events: Vec<HarnessEvent>,
}

impl EventLog {
    fn push(&mut self, event: HarnessEvent) {
        trace::emit_on(event.channel(), &event);
        self.events.push(event);
    }
}

/// Runs an [`ExchangeScript`] against a pipeline.
///
/// # Type Parameters
///
/// - `E`: entropy for the resampling stage
pub struct Verifier<'p, E: Entropy> {
    pipeline: &'p Pipeline,
    entropy: E,
    log: EventLog,
}

impl<'p, E: Entropy> Verifier<'p, E> {
    /// Verifier over `pipeline` drawing from `entropy`.
    ///
    /// Pass a freshly constructed source when replaying a calibrated script.
    pub fn new(pipeline: &'p Pipeline, entropy: E) -> Self {
        Self { pipeline, entropy, log: EventLog::default() }
    }

    /// Run the script to completion or to its first failure.
    ///
    /// Consumes the verifier: its entropy stream is spent by the run.
    pub fn verify(mut self, script: &ExchangeScript) -> VerificationReport {
        let active = self.entropy.reproducibility();
        tracing::info!(
            target: MILESTONE_TARGET,
            steps = script.len(),
            entropy = %active,
            "verifying exchange"
        );

        let agent_a = Agent::new(AgentRole::A, self.pipeline);
        let agent_b = Agent::new(AgentRole::B, self.pipeline);
        let mut steps_evaluated = 0;

        for (index, step) in script.steps().iter().enumerate() {
            let number = index + 1;
            steps_evaluated = number;
            self.log.push(HarnessEvent::StepStarted { step: number });

            let message = agent_a.encode(step.outbound);
            self.log.push(HarnessEvent::Sent {
                from: AgentRole::A,
                to: AgentRole::B,
                message: message.clone(),
            });

            let response = agent_b.answer(step.outbound, &mut self.entropy);
            self.record_response(AgentRole::B, &response);

            let expected = encode_word(step.expected_response);
            if let Some(failure) =
                self.check(number, Direction::Response, expected, response.message, script.source(), active)
            {
                return self.finish(Verdict::Failed(failure), steps_evaluated);
            }

            let replay = agent_a.encode(step.expected_send);
            self.log.push(HarnessEvent::Sent {
                from: AgentRole::A,
                to: AgentRole::A,
                message: replay.clone(),
            });

            let replayed = agent_a.answer(step.expected_send, &mut self.entropy);
            self.record_response(AgentRole::A, &replayed);

            if let Some(failure) =
                self.check(number, Direction::Replay, message, replayed.message, script.source(), active)
            {
                return self.finish(Verdict::Failed(failure), steps_evaluated);
            }

            self.log.push(HarnessEvent::StepVerified { step: number });
        }

        self.finish(Verdict::Verified { steps: steps_evaluated }, steps_evaluated)
    }

    fn record_response(&mut self, agent: AgentRole, response: &crate::Response) {
        for record in &response.run.trace {
            self.log.push(HarnessEvent::Pipeline { agent, record: record.clone() });
        }
        self.log.push(HarnessEvent::Responded { agent, message: response.message.clone() });
    }

    fn check(
        &mut self,
        step: usize,
        direction: Direction,
        expected: String,
        actual: String,
        recorded: Option<Reproducibility>,
        active: Reproducibility,
    ) -> Option<StepFailure> {
        self.log.push(HarnessEvent::Checked {
            step,
            direction,
            expected: expected.clone(),
            actual: actual.clone(),
        });

        (expected != actual).then(|| StepFailure {
            step,
            direction,
            expected,
            actual,
            cause: FailureCause::classify(recorded, active),
        })
    }

    fn finish(self, verdict: Verdict, steps_evaluated: usize) -> VerificationReport {
        match &verdict {
            Verdict::Verified { .. } => tracing::info!(target: MILESTONE_TARGET, "{verdict}"),
            Verdict::Failed(failure) => match failure.cause {
                FailureCause::Mismatch => tracing::error!(target: MILESTONE_TARGET, "{verdict}"),
                FailureCause::NonReproducible { .. } => {
                    tracing::warn!(target: MILESTONE_TARGET, "{verdict}");
                },
            },
        }

        VerificationReport { verdict, steps_evaluated, events: self.log.events }
    }
}
