//! Entropy sources selectable from the command line.

use serpent_core::{Entropy, FixedEntropy, Reproducibility};
use serpent_harness::SeededEntropy;

/// Production entropy from the operating system.
///
/// Uses `getrandom`, so draws cannot be replayed and the source reports
/// [`Reproducibility::Unseeded`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEntropy;

impl Entropy for SystemEntropy {
    fn random_bytes(&mut self, buffer: &mut [u8]) {
        getrandom::fill(buffer).unwrap_or_else(|e| {
            // NOTE: getrandom does not fail on supported platforms. Zero bytes keep the
            // run going; the resulting words are not random.
            tracing::error!("getrandom failed: {}", e);
            buffer.fill(0);
        });
    }
}

/// The source chosen by the user.
#[derive(Debug, Clone)]
pub enum CliEntropy {
    /// Seeded `ChaCha20` generator.
    Seeded(Box<SeededEntropy>),
    /// Every measurement collapses to one bit.
    Fixed(FixedEntropy),
    /// OS entropy.
    System(SystemEntropy),
}

impl CliEntropy {
    /// Seeded source starting at the beginning of its stream.
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(Box::new(SeededEntropy::with_seed(seed)))
    }

    /// Resolve flags into a source. `collapse` wins over `seed`.
    pub fn select(seed: Option<u64>, collapse: Option<bool>) -> Self {
        match (collapse, seed) {
            (Some(false), _) => Self::Fixed(FixedEntropy::zeros()),
            (Some(true), _) => Self::Fixed(FixedEntropy::ones()),
            (None, Some(seed)) => Self::seeded(seed),
            (None, None) => Self::System(SystemEntropy),
        }
    }
}

impl Entropy for CliEntropy {
    fn random_bytes(&mut self, buffer: &mut [u8]) {
        match self {
            Self::Seeded(e) => e.random_bytes(buffer),
            Self::Fixed(e) => e.random_bytes(buffer),
            Self::System(e) => e.random_bytes(buffer),
        }
    }

    fn measure(&mut self, probability: f64) -> bool {
        match self {
            Self::Seeded(e) => e.measure(probability),
            Self::Fixed(e) => e.measure(probability),
            Self::System(e) => e.measure(probability),
        }
    }

    fn reproducibility(&self) -> Reproducibility {
        match self {
            Self::Seeded(e) => e.reproducibility(),
            Self::Fixed(e) => e.reproducibility(),
            Self::System(e) => e.reproducibility(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_entropy_is_random() {
        let mut entropy = SystemEntropy;

        let mut bytes1 = [0u8; 32];
        let mut bytes2 = [0u8; 32];
        entropy.random_bytes(&mut bytes1);
        entropy.random_bytes(&mut bytes2);

        // Extremely unlikely to be equal if random
        assert_ne!(bytes1, bytes2, "random bytes should differ");
        assert_eq!(entropy.reproducibility(), Reproducibility::Unseeded);
    }

    #[test]
    fn selection_precedence() {
        assert_eq!(
            CliEntropy::select(Some(3), Some(false)).reproducibility(),
            Reproducibility::Constant(false)
        );
        assert_eq!(CliEntropy::select(Some(3), None).reproducibility(), Reproducibility::seeded(3));
        assert_eq!(CliEntropy::select(None, None).reproducibility(), Reproducibility::Unseeded);
    }

    #[test]
    fn fixed_selection_forwards_measurement() {
        let mut entropy = CliEntropy::select(None, Some(true));
        assert!(entropy.measure(0.0));
    }
}
