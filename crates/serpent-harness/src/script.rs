//! Exchange scripts: the ordered steps a verification run replays.

use serpent_core::{Entropy, Pipeline, Reproducibility, Word, decode_word};

use crate::{HarnessError, SeededEntropy};

/// One scripted step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeStep {
    /// Word A sends to B.
    pub outbound: Word,
    /// Word B is expected to answer with.
    pub expected_response: Word,
    /// Word A replays through the pipeline; the replay must reproduce
    /// `outbound`.
    pub expected_send: Word,
}

impl ExchangeStep {
    /// Decode a step from its three hex fields.
    pub fn from_hex(
        outbound: &str,
        expected_response: &str,
        expected_send: &str,
    ) -> Result<Self, HarnessError> {
        Ok(Self {
            outbound: decode_word(outbound)?,
            expected_response: decode_word(expected_response)?,
            expected_send: decode_word(expected_send)?,
        })
    }
}

/// An ordered, read-only list of steps.
///
/// `recorded_under` names the entropy source the expected values were
/// computed under, if known.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExchangeScript {
    steps: Vec<ExchangeStep>,
    recorded_under: Option<Reproducibility>,
}

impl ExchangeScript {
    /// Script from explicit steps with no recorded entropy source.
    pub fn new(steps: Vec<ExchangeStep>) -> Self {
        Self { steps, recorded_under: None }
    }

    /// Mark the entropy source the expected values were computed under.
    #[must_use]
    pub fn recorded_under(mut self, source: Reproducibility) -> Self {
        self.recorded_under = Some(source);
        self
    }

    /// Decode `(outbound, expected_response, expected_send)` rows.
    ///
    /// Fails on the first malformed field.
    pub fn from_hex_rows(rows: &[(&str, &str, &str)]) -> Result<Self, HarnessError> {
        let steps = rows
            .iter()
            .map(|(outbound, response, send)| ExchangeStep::from_hex(outbound, response, send))
            .collect::<Result<_, _>>()?;
        Ok(Self::new(steps))
    }

    /// Compute a script that verifies under `SeededEntropy::with_seed(seed)`.
    pub fn calibrate(pipeline: &Pipeline, seed: u64, sends: &[Word]) -> Self {
        let steps = Self::record(pipeline, &mut SeededEntropy::with_seed(seed), sends);
        Self { steps, recorded_under: Some(Reproducibility::seeded(seed)) }
    }

    /// Compute a script that verifies when replayed from a copy of `entropy`
    /// taken before this call.
    ///
    /// The source's reproducibility, including its stream position, is
    /// recorded before any draw. Unseeded sources are refused.
    pub fn calibrate_with<E: Entropy>(
        pipeline: &Pipeline,
        mut entropy: E,
        sends: &[Word],
    ) -> Result<Self, HarnessError> {
        let source = entropy.reproducibility();
        if !source.is_reproducible() {
            return Err(HarnessError::Calibration {
                source_kind: source,
                reason: "draws cannot be replayed".to_string(),
            });
        }

        let steps = Self::record(pipeline, &mut entropy, sends);
        Ok(Self { steps, recorded_under: Some(source) })
    }

    /// Draw B's response and A's replay for each send, in verification order.
    ///
    /// Resampling discards the input word, so a run's output depends only on
    /// the entropy drawn. Running B on `send` here draws exactly what B will
    /// draw on the outbound word during verification.
    fn record<E: Entropy>(pipeline: &Pipeline, entropy: &mut E, sends: &[Word]) -> Vec<ExchangeStep> {
        sends
            .iter()
            .map(|&send| {
                let expected_response = pipeline.run(send, entropy).output;
                let outbound = pipeline.run(send, entropy).output;
                ExchangeStep { outbound, expected_response, expected_send: send }
            })
            .collect()
    }

    /// Steps in order.
    pub fn steps(&self) -> &[ExchangeStep] {
        &self.steps
    }

    /// Mutable access to the steps, for building deliberately broken scripts.
    pub fn steps_mut(&mut self) -> &mut [ExchangeStep] {
        &mut self.steps
    }

    /// Entropy source the expected values were computed under.
    pub fn source(&self) -> Option<Reproducibility> {
        self.recorded_under
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the script has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
