//! Pipeline configuration.

use crate::{
    CrownedPrime, Operation, Reflector, ResamplingStage, Transformer, Word, crown::is_prime,
    error::ConfigError,
};

/// Weight key `333`.
pub const KEY_333: Word = 0x0333;

/// Weight key `555`.
pub const KEY_555: Word = 0x0555;

/// Weight key `AAA`.
pub const KEY_AAA: Word = 0x0AAA;

/// Everything a pipeline run needs, fixed at construction.
///
/// Built once and never mutated; pass it (or a [`Pipeline`](crate::Pipeline)
/// owning it) explicitly to whoever runs the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    transformers: Vec<Transformer>,
    crowns: Vec<CrownedPrime>,
    resampling: ResamplingStage,
    final_reflector: Reflector,
}

impl PipelineConfig {
    /// Build a custom configuration.
    ///
    /// Every crowned prime must actually be prime.
    pub fn new(
        transformers: Vec<Transformer>,
        crowns: Vec<CrownedPrime>,
        resampling: ResamplingStage,
        final_reflector: Reflector,
    ) -> Result<Self, ConfigError> {
        if let Some(crown) = crowns.iter().find(|c| !is_prime(c.prime)) {
            return Err(ConfigError::NotPrime { prime: crown.prime });
        }

        Ok(Self { transformers, crowns, resampling, final_reflector })
    }

    /// The standard three-transformer configuration.
    pub fn standard() -> Self {
        let transformers = vec![
            Transformer::new("transformer-1", vec![
                Operation::RotateLeft(3),
                Operation::XorWithKey(KEY_333),
            ]),
            Transformer::new("transformer-2", vec![
                Operation::InvertBits,
                Operation::RotateRight(2),
            ]),
            Transformer::new("transformer-3", vec![
                Operation::Reflect(Reflector::ONES),
                Operation::XorWithKey(KEY_555),
                Operation::RotateLeft(1),
            ]),
        ];

        let crowns = vec![
            CrownedPrime::new(3, KEY_333),
            CrownedPrime::new(5, KEY_555),
            CrownedPrime::new(7, KEY_AAA),
        ];

        Self {
            transformers,
            crowns,
            resampling: ResamplingStage::default(),
            final_reflector: Reflector::ONES,
        }
    }

    /// Transformers in execution order.
    pub fn transformers(&self) -> &[Transformer] {
        &self.transformers
    }

    /// Crowned primes in execution order.
    pub fn crowns(&self) -> &[CrownedPrime] {
        &self.crowns
    }

    /// The resampling stage.
    pub fn resampling(&self) -> ResamplingStage {
        self.resampling
    }

    /// Reflector applied last.
    pub fn final_reflector(&self) -> Reflector {
        self.final_reflector
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout() {
        let config = PipelineConfig::standard();

        let names: Vec<_> = config.transformers().iter().map(Transformer::name).collect();
        assert_eq!(names, vec!["transformer-1", "transformer-2", "transformer-3"]);
        assert_eq!(config.crowns().len(), 3);
        assert_eq!(config.final_reflector(), Reflector::ONES);
        assert!((config.resampling().probability() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn standard_config_passes_validation() {
        let standard = PipelineConfig::standard();
        let rebuilt = PipelineConfig::new(
            standard.transformers().to_vec(),
            standard.crowns().to_vec(),
            standard.resampling(),
            standard.final_reflector(),
        );

        assert_eq!(rebuilt, Ok(standard));
    }

    #[test]
    fn rejects_composite_crown() {
        let result = PipelineConfig::new(
            Vec::new(),
            vec![CrownedPrime::new(3, KEY_333), CrownedPrime::new(9, KEY_555)],
            ResamplingStage::default(),
            Reflector::ZEROS,
        );

        assert_eq!(result, Err(ConfigError::NotPrime { prime: 9 }));
    }
}
