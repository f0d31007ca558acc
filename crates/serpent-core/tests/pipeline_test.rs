//! End-to-end pipeline tests through the public API.

#![allow(clippy::unwrap_used)]

use serpent_core::{
    Channel, CrownedPrime, FixedEntropy, Operation, Pipeline, PipelineConfig, Reflector, ResamplingStage,
    Stage, TraceRecord, Transformer, decode_word, encode_word,
};

#[test]
fn reference_word_end_to_end() {
    let pipeline = Pipeline::standard();
    let input = decode_word("1234").unwrap();

    let run = pipeline.run(input, &mut FixedEntropy::zeros());

    assert_eq!(run.word_entering(&Stage::Resampling), Some(0x9A75));
    assert_eq!(encode_word(run.output), "ffff");
}

#[test]
fn same_config_drives_independent_pipelines() {
    let config = PipelineConfig::standard();
    let first = Pipeline::new(config.clone());
    let second = Pipeline::new(config);

    for word in [0x0001, 0x0083, 0x0000, 0x00E5, 0x73AF] {
        assert_eq!(first.run_deterministic(word), second.run_deterministic(word));
    }
}

#[test]
fn custom_config_runs_its_own_stages() {
    let config = PipelineConfig::new(
        vec![Transformer::new("swap-bytes", vec![Operation::RotateLeft(8)])],
        vec![CrownedPrime::new(2, 0x0101)],
        ResamplingStage::new(1.0).unwrap(),
        Reflector::ZEROS,
    )
    .unwrap();
    let pipeline = Pipeline::new(config);

    let (deterministic, _) = pipeline.run_deterministic(0x12AB);
    assert_eq!(deterministic, 0xAB12 ^ 0x0202);

    let run = pipeline.run(0x12AB, &mut FixedEntropy::zeros());
    assert_eq!(run.output, 0x0000);
    assert!(run.trace.iter().any(|r| matches!(
        r,
        TraceRecord::Reflected { reflector, .. } if *reflector == Reflector::ZEROS
    )));
}

#[test]
fn trace_splits_into_milestones_and_detail() {
    let run = Pipeline::standard().run(0x73AF, &mut FixedEntropy::ones());

    let milestones: Vec<_> =
        run.trace.iter().filter(|r| r.channel() == Channel::Milestone).collect();
    assert_eq!(milestones.len(), 7, "six stage entries and completion");
    assert_eq!(
        milestones.last(),
        Some(&&TraceRecord::Completed { input: 0x73AF, output: 0x0000 })
    );
    assert!(run.trace.iter().filter(|r| r.channel() == Channel::Detail).all(|r| matches!(
        r,
        TraceRecord::OperationApplied { .. }
            | TraceRecord::CrownApplied { .. }
            | TraceRecord::Resampled { .. }
            | TraceRecord::Reflected { .. }
    )));
}
