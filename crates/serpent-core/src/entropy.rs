//! Entropy abstraction for the resampling stage.
//!
//! The `Entropy` trait decouples the pipeline from where its randomness
//! comes from. This enables:
//!
//! - Deterministic runs: a seeded generator (or a constant source) makes the
//!   whole pipeline reproducible, so expected values can be recorded once
//!   and replayed.
//!
//! - Production runs: an OS-backed source without any change to the
//!   pipeline itself.
//!
//! # Invariants
//!
//! - Determinism: a source reporting [`Reproducibility::Seeded`] or
//!   [`Reproducibility::Constant`] produces the same measurement sequence
//!   every time it is rebuilt from the same parameters
//! - Position: a seeded source reports how far its stream has advanced, so
//!   a source that was drawn from never compares equal to a fresh one
//! - Isolation: implementations must not share global state

use std::fmt;

/// How (and whether) an entropy source can be reproduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reproducibility {
    /// Generator seeded with `seed`, `position` words into its stream.
    Seeded {
        /// Seed the generator was built from.
        seed: u64,
        /// Words already drawn; 0 for a fresh generator.
        position: u128,
    },
    /// Every measurement yields this bit.
    Constant(bool),
    /// Not reproducible (e.g. OS entropy).
    Unseeded,
}

impl Reproducibility {
    /// A freshly seeded generator.
    pub const fn seeded(seed: u64) -> Self {
        Self::Seeded { seed, position: 0 }
    }

    /// Whether rerunning with an equivalent source repeats every draw.
    pub fn is_reproducible(self) -> bool {
        !matches!(self, Self::Unseeded)
    }
}

impl fmt::Display for Reproducibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seeded { seed, position: 0 } => write!(f, "seed {seed}"),
            Self::Seeded { seed, position } => write!(f, "seed {seed} at word {position}"),
            Self::Constant(bit) => write!(f, "constant {}", u8::from(*bit)),
            Self::Unseeded => f.write_str("unseeded"),
        }
    }
}

/// Source of randomness for probabilistic stages.
pub trait Entropy {
    /// Fill `buffer` with random bytes.
    fn random_bytes(&mut self, buffer: &mut [u8]);

    /// Generate a random `u64`.
    fn random_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }

    /// Uniform float in `[0, 1)` built from the top 53 bits of a `u64`.
    #[allow(clippy::cast_precision_loss)]
    fn random_unit(&mut self) -> f64 {
        (self.random_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Measure a bit that is 1 with the given probability.
    fn measure(&mut self, probability: f64) -> bool {
        self.random_unit() < probability
    }

    /// Whether this source can be replayed.
    fn reproducibility(&self) -> Reproducibility {
        Reproducibility::Unseeded
    }
}

impl<E: Entropy + ?Sized> Entropy for &mut E {
    fn random_bytes(&mut self, buffer: &mut [u8]) {
        (**self).random_bytes(buffer);
    }

    fn measure(&mut self, probability: f64) -> bool {
        (**self).measure(probability)
    }

    fn reproducibility(&self) -> Reproducibility {
        (**self).reproducibility()
    }
}

/// Entropy that always measures the same bit.
///
/// With `zeros()` the resampling stage collapses every word to `0x0000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedEntropy {
    bit: bool,
}

impl FixedEntropy {
    /// Every measurement yields 0.
    pub const fn zeros() -> Self {
        Self { bit: false }
    }

    /// Every measurement yields 1.
    pub const fn ones() -> Self {
        Self { bit: true }
    }
}

impl Entropy for FixedEntropy {
    fn random_bytes(&mut self, buffer: &mut [u8]) {
        buffer.fill(if self.bit { 0xFF } else { 0x00 });
    }

    fn measure(&mut self, _probability: f64) -> bool {
        self.bit
    }

    fn reproducibility(&self) -> Reproducibility {
        Reproducibility::Constant(self.bit)
    }
}
