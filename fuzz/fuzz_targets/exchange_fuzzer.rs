//! Fuzz target for the [`Verifier`]
//!
//! # Strategy
//!
//! - Calibrate a script from arbitrary sends under an arbitrary seed
//! - Corrupt an arbitrary field of an arbitrary step
//! - Replay under the calibration seed or a different one
//!
//! # Invariants
//!
//! - Uncorrupted scripts replayed under their seed ALWAYS verify
//! - A corrupted script fails exactly at the corrupted step
//! - Steps after a failure are NEVER evaluated
//! - A different replay seed is NEVER reported as a logic mismatch

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serpent_core::Pipeline;
use serpent_harness::{ExchangeScript, FailureCause, SeededEntropy, Verdict, Verifier};

#[derive(Debug, Arbitrary)]
enum Corruption {
    None,
    Outbound { step: u8, flip: u16 },
    Response { step: u8, flip: u16 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    seed: u64,
    replay_offset: u8,
    sends: Vec<u16>,
    corruption: Corruption,
}

fuzz_target!(|input: Input| {
    let sends: Vec<u16> = input.sends.into_iter().take(16).collect();
    let pipeline = Pipeline::standard();
    let mut script = ExchangeScript::calibrate(&pipeline, input.seed, &sends);

    let corrupted = match input.corruption {
        _ if script.is_empty() => None,
        Corruption::None
        | Corruption::Outbound { flip: 0, .. }
        | Corruption::Response { flip: 0, .. } => None,
        Corruption::Outbound { step, flip } => {
            let index = usize::from(step) % script.len();
            script.steps_mut()[index].outbound ^= flip;
            Some(index + 1)
        },
        Corruption::Response { step, flip } => {
            let index = usize::from(step) % script.len();
            script.steps_mut()[index].expected_response ^= flip;
            Some(index + 1)
        },
    };

    let replay_seed = input.seed.wrapping_add(u64::from(input.replay_offset));
    let report = Verifier::new(&pipeline, SeededEntropy::with_seed(replay_seed)).verify(&script);

    match (&report.verdict, corrupted, input.replay_offset) {
        (Verdict::Verified { steps }, None, 0) => assert_eq!(*steps, sends.len()),
        (Verdict::Failed(failure), _, 0) => {
            let corrupted = corrupted.unwrap_or_else(|| unreachable!("clean script failed"));
            assert_eq!(failure.step, corrupted);
            assert_eq!(failure.cause, FailureCause::Mismatch);
            assert_eq!(report.steps_evaluated, failure.step);
        },
        (Verdict::Failed(failure), _, _) => {
            assert!(matches!(failure.cause, FailureCause::NonReproducible { .. }));
            assert_eq!(report.steps_evaluated, failure.step);
        },
        (Verdict::Verified { .. }, Some(step), 0) => unreachable!("corrupted step {step} verified"),
        (Verdict::Verified { .. }, _, _) => {},
    }
});
