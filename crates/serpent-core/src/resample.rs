//! Resampling stage ("quantum-inspired").
//!
//! Each of the 16 bit positions is prepared with a Bernoulli parameter equal
//! to its current bit, then reset to the stage's superposition probability
//! and measured. The reset discards the input: the output depends on the
//! entropy draws alone.

use crate::{Entropy, TraceRecord, WORD_BITS, Word, error::ConfigError};

/// Probability used by the standard stage.
pub const SUPERPOSITION: f64 = 0.5;

/// Per-bit resampling with a fixed probability of measuring 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResamplingStage {
    probability: f64,
}

impl ResamplingStage {
    /// Stage with a custom probability of measuring 1.
    pub fn new(probability: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(ConfigError::InvalidProbability { probability });
        }
        Ok(Self { probability })
    }

    /// Probability of each bit measuring 1.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Per-bit Bernoulli parameters after the reset, bit 0 first.
    ///
    /// `word` only seeds the prepared state; every parameter is overwritten.
    pub fn distribution(&self, word: Word) -> [f64; WORD_BITS as usize] {
        let mut state: [f64; WORD_BITS as usize] =
            std::array::from_fn(|bit| f64::from((word >> bit) & 1));
        state.fill(self.probability);
        state
    }

    /// Measure a fresh word, least significant bit first.
    pub fn apply<E: Entropy>(&self, word: Word, entropy: &mut E) -> (Word, TraceRecord) {
        let measured = self
            .distribution(word)
            .iter()
            .enumerate()
            .fold(0, |acc, (bit, &p)| if entropy.measure(p) { acc | (1 << bit) } else { acc });

        (measured, TraceRecord::Resampled { before: word, after: measured })
    }
}

impl Default for ResamplingStage {
    fn default() -> Self {
        Self { probability: SUPERPOSITION }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    use super::*;
    use crate::FixedEntropy;

    struct TestEntropy(ChaCha20Rng);

    impl Entropy for TestEntropy {
        fn random_bytes(&mut self, buffer: &mut [u8]) {
            self.0.fill_bytes(buffer);
        }
    }

    #[test]
    fn collapses_to_constant_bits() {
        let stage = ResamplingStage::default();

        assert_eq!(stage.apply(0x9A75, &mut FixedEntropy::zeros()).0, 0x0000);
        assert_eq!(stage.apply(0x0000, &mut FixedEntropy::ones()).0, 0xFFFF);
    }

    #[test]
    fn distribution_is_reset_regardless_of_input() {
        let stage = ResamplingStage::default();

        assert!(stage.distribution(0xFFFF).iter().all(|&p| (p - 0.5).abs() < f64::EPSILON));
        assert_eq!(
            stage.distribution(0x0000).map(f64::to_bits),
            stage.distribution(0xFFFF).map(f64::to_bits)
        );
    }

    #[test]
    fn rejects_probability_out_of_range() {
        assert!(matches!(
            ResamplingStage::new(1.5),
            Err(ConfigError::InvalidProbability { .. })
        ));
        assert!(ResamplingStage::new(f64::NAN).is_err());
        assert!(ResamplingStage::new(0.0).is_ok());
    }

    #[test]
    fn extreme_probabilities_are_deterministic() {
        let mut entropy = TestEntropy(ChaCha20Rng::seed_from_u64(1));

        let never = ResamplingStage::new(0.0).unwrap();
        let always = ResamplingStage::new(1.0).unwrap();

        assert_eq!(never.apply(0xFFFF, &mut entropy).0, 0x0000);
        assert_eq!(always.apply(0x0000, &mut entropy).0, 0xFFFF);
    }

    #[test]
    fn bit_frequencies_converge_to_one_half() {
        const RUNS: u32 = 4000;

        let stage = ResamplingStage::default();
        let mut entropy = TestEntropy(ChaCha20Rng::seed_from_u64(42));
        let mut ones = [0u32; WORD_BITS as usize];

        for run in 0..RUNS {
            let (word, _) = stage.apply((run & 0xFFFF) as Word, &mut entropy);
            for (bit, count) in ones.iter_mut().enumerate() {
                *count += u32::from((word >> bit) & 1);
            }
        }

        for (bit, count) in ones.iter().enumerate() {
            let frequency = f64::from(*count) / f64::from(RUNS);
            assert!((frequency - 0.5).abs() < 0.05, "bit {bit} measured 1 with frequency {frequency}");
        }
    }
}
