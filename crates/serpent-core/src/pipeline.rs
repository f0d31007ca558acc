//! Pipeline orchestrator.
//!
//! Runs the stages in a fixed linear order, no branching and no retries:
//!
//! ```text
//! Start → transformers (in order) → crowned primes → resampling
//!       → final reflection → Done
//! ```
//!
//! No stage may be skipped or reordered and no input can fail.

use crate::{
    Entropy, PipelineConfig, Stage, TraceRecord, Word, crown::apply_crowns, ops::reflect,
};

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRun {
    /// Word the run started with.
    pub input: Word,
    /// Word the run produced.
    pub output: Word,
    /// Every stage transition and operation, in order.
    pub trace: Vec<TraceRecord>,
}

impl PipelineRun {
    /// Word entering the given stage, if the stage ran.
    pub fn word_entering(&self, stage: &Stage) -> Option<Word> {
        self.trace.iter().find_map(|record| match record {
            TraceRecord::StageEntered { stage: s, word } if s == stage => Some(*word),
            _ => None,
        })
    }
}

/// The orchestrator. Owns an immutable [`PipelineConfig`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline over `config`.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Pipeline over [`PipelineConfig::standard`].
    pub fn standard() -> Self {
        Self::new(PipelineConfig::standard())
    }

    /// The configuration this pipeline runs.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage before resampling.
    ///
    /// Deterministic: needs no entropy.
    pub fn run_deterministic(&self, word: Word) -> (Word, Vec<TraceRecord>) {
        let mut trace = Vec::new();
        let mut current = word;

        for transformer in self.config.transformers() {
            trace.push(TraceRecord::StageEntered {
                stage: Stage::Transformer(transformer.name().to_string()),
                word: current,
            });
            let (next, records) = transformer.apply_traced(current);
            trace.extend(records);
            current = next;
        }

        trace.push(TraceRecord::StageEntered { stage: Stage::CrownedPrimes, word: current });
        let (next, records) = apply_crowns(current, self.config.crowns());
        trace.extend(records);

        (next, trace)
    }

    /// Run the full pipeline on `word`.
    ///
    /// The output is reproducible only if `entropy` is.
    pub fn run<E: Entropy>(&self, word: Word, entropy: &mut E) -> PipelineRun {
        let (mut current, mut trace) = self.run_deterministic(word);

        trace.push(TraceRecord::StageEntered { stage: Stage::Resampling, word: current });
        let (next, record) = self.config.resampling().apply(current, entropy);
        trace.push(record);
        current = next;

        let reflector = self.config.final_reflector();
        trace.push(TraceRecord::StageEntered { stage: Stage::FinalReflection, word: current });
        let before = current;
        current = reflect(current, reflector);
        trace.push(TraceRecord::Reflected { reflector, before, after: current });

        trace.push(TraceRecord::Completed { input: word, output: current });

        PipelineRun { input: word, output: current, trace }
    }
}
