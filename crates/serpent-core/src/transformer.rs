//! Named sequences of primitive operations.

use crate::{Operation, TraceRecord, Word};

/// A named, ordered sequence of primitive operations.
///
/// Immutable once built. Operations run left to right, each consuming the
/// previous one's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformer {
    name: String,
    operations: Vec<Operation>,
}

impl Transformer {
    /// Create a transformer from its name and operation sequence.
    pub fn new(name: impl Into<String>, operations: Vec<Operation>) -> Self {
        Self { name: name.into(), operations }
    }

    /// Transformer name, used in traces.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operations in execution order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Apply every operation in order.
    pub fn apply(&self, word: Word) -> Word {
        self.operations.iter().fold(word, |word, op| op.apply(word))
    }

    /// Apply every operation in order, recording each step.
    ///
    /// Returns the same word as [`Transformer::apply`]; the records are
    /// diagnostics only.
    pub fn apply_traced(&self, word: Word) -> (Word, Vec<TraceRecord>) {
        let mut records = Vec::with_capacity(self.operations.len());
        let mut current = word;

        for (index, operation) in self.operations.iter().enumerate() {
            let before = current;
            current = operation.apply(current);
            records.push(TraceRecord::OperationApplied {
                transformer: self.name.clone(),
                index,
                operation: *operation,
                before,
                after: current,
            });
        }

        (current, records)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::PipelineConfig;

    fn render(records: &[TraceRecord]) -> String {
        records.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn standard_transformers_on_reference_word() {
        let config = PipelineConfig::standard();
        let [t1, t2, t3] = config.transformers() else {
            unreachable!("standard config has three transformers");
        };

        assert_eq!(t1.apply(0x1234), 0x9293);
        assert_eq!(t2.apply(0x9293), 0x1B5B);
        assert_eq!(t3.apply(0x1B5B), 0xC3E3);
    }

    #[test]
    fn empty_transformer_is_identity() {
        let transformer = Transformer::new("empty", Vec::new());
        let (word, records) = transformer.apply_traced(0xABCD);

        assert_eq!(word, 0xABCD);
        assert!(records.is_empty());
    }

    #[test]
    fn trace_renders_every_operation() {
        let config = PipelineConfig::standard();
        let (word, records) = config.transformers()[0].apply_traced(0x1234);

        assert_eq!(word, 0x9293);
        insta::assert_snapshot!(render(&records), @r"
        transformer-1[0] rotate_left(3): 0001001000110100 -> 1001000110100000
        transformer-1[1] xor_with_key(0x0333): 1001000110100000 -> 1001001010010011
        ");
    }

    #[test]
    fn trace_of_three_step_transformer() {
        let config = PipelineConfig::standard();
        let (_, records) = config.transformers()[2].apply_traced(0x1B5B);

        insta::assert_snapshot!(render(&records), @r"
        transformer-3[0] reflect(REFLECTOR_FFF): 0001101101011011 -> 1110010010100100
        transformer-3[1] xor_with_key(0x0555): 1110010010100100 -> 1110000111110001
        transformer-3[2] rotate_left(1): 1110000111110001 -> 1100001111100011
        ");
    }

    proptest! {
        #[test]
        fn traced_and_untraced_agree(word: Word) {
            for transformer in PipelineConfig::standard().transformers() {
                let (traced, records) = transformer.apply_traced(word);
                prop_assert_eq!(traced, transformer.apply(word));
                prop_assert_eq!(records.len(), transformer.operations().len());
            }
        }

        #[test]
        fn transformers_are_deterministic(word: Word) {
            let config = PipelineConfig::standard();
            for transformer in config.transformers() {
                prop_assert_eq!(transformer.apply(word), transformer.apply(word));
            }
        }
    }
}
