//! Agents exchanging hex-encoded words.

use std::fmt;

use serpent_core::{
    DecodeError, Entropy, Pipeline, PipelineRun, Word, decode_word, encode_word,
};

/// The two parties of an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentRole {
    /// Sends scripted words and replays expected sends.
    A,
    /// Answers A's messages.
    B,
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

/// An agent's answer to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Hex-encoded answer.
    pub message: String,
    /// The pipeline run that produced it.
    pub run: PipelineRun,
}

/// One logical party. Answers by running the shared pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Agent<'p> {
    role: AgentRole,
    pipeline: &'p Pipeline,
}

impl<'p> Agent<'p> {
    /// Agent playing `role` over `pipeline`.
    pub fn new(role: AgentRole, pipeline: &'p Pipeline) -> Self {
        Self { role, pipeline }
    }

    /// This agent's role.
    pub fn role(&self) -> AgentRole {
        self.role
    }

    /// Encode a word for sending.
    pub fn encode(&self, word: Word) -> String {
        encode_word(word)
    }

    /// Run an already decoded word through the pipeline.
    pub fn answer<E: Entropy>(&self, word: Word, entropy: &mut E) -> Response {
        let run = self.pipeline.run(word, entropy);
        Response { message: encode_word(run.output), run }
    }

    /// Decode `message`, run it through the pipeline and encode the result.
    ///
    /// Malformed messages are rejected, never read as zero.
    pub fn respond<E: Entropy>(
        &self,
        message: &str,
        entropy: &mut E,
    ) -> Result<Response, DecodeError> {
        let word = decode_word(message)?;
        Ok(self.answer(word, entropy))
    }
}

/// Transform a batch of hex strings, one result per input.
///
/// Inputs are processed in order against one entropy stream. A malformed
/// input yields its [`DecodeError`] in place and draws no entropy. Each
/// response keeps its run so callers can emit the trace.
pub fn transform_batch<E: Entropy, S: AsRef<str>>(
    pipeline: &Pipeline,
    entropy: &mut E,
    inputs: &[S],
) -> Vec<Result<Response, DecodeError>> {
    let agent = Agent::new(AgentRole::B, pipeline);
    inputs.iter().map(|input| agent.respond(input.as_ref(), entropy)).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serpent_core::{FixedEntropy, TraceRecord};

    use super::*;

    #[test]
    fn responds_with_encoded_pipeline_output() {
        let pipeline = Pipeline::standard();
        let agent = Agent::new(AgentRole::B, &pipeline);

        let response = agent.respond("1234", &mut FixedEntropy::zeros()).unwrap();

        assert_eq!(response.message, "ffff");
        assert_eq!(response.run.input, 0x1234);
    }

    #[test]
    fn rejects_malformed_message() {
        let pipeline = Pipeline::standard();
        let agent = Agent::new(AgentRole::A, &pipeline);

        let result = agent.respond("94eeb5ec", &mut FixedEntropy::zeros());
        assert!(matches!(result, Err(DecodeError::WrongLength { len: 8, .. })));
    }

    #[test]
    fn batch_keeps_errors_in_place() {
        let pipeline = Pipeline::standard();
        let inputs = ["0001", "541A4231", "zzzz", "73AF"];

        let results = transform_batch(&pipeline, &mut FixedEntropy::ones(), &inputs);

        let messages: Vec<_> =
            results.iter().map(|r| r.as_ref().map(|response| response.message.as_str())).collect();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0], Ok("0000"));
        assert!(messages[1].is_err());
        assert!(messages[2].is_err());
        assert_eq!(messages[3], Ok("0000"));
    }

    #[test]
    fn batch_keeps_each_run_trace() {
        let pipeline = Pipeline::standard();

        let results = transform_batch(&pipeline, &mut FixedEntropy::zeros(), &["1234"]);
        let response = results[0].as_ref().unwrap();

        assert_eq!(response.run.input, 0x1234);
        assert_eq!(response.run.output, 0xFFFF);
        assert_eq!(
            response.run.trace.last(),
            Some(&TraceRecord::Completed { input: 0x1234, output: 0xFFFF })
        );
        assert!(response.run.trace.iter().any(|r| matches!(
            r,
            TraceRecord::OperationApplied { transformer, index: 0, before: 0x1234, .. }
                if transformer == "transformer-1"
        )));
    }

    #[test]
    fn answer_skips_decoding() {
        let pipeline = Pipeline::standard();
        let agent = Agent::new(AgentRole::B, &pipeline);

        let answered = agent.answer(0x1234, &mut FixedEntropy::zeros());
        let responded = agent.respond("1234", &mut FixedEntropy::zeros()).unwrap();

        assert_eq!(answered, responded);
    }

    #[test]
    fn role_display() {
        assert_eq!(AgentRole::A.to_string(), "A");
        assert_eq!(AgentRole::B.to_string(), "B");
    }
}
