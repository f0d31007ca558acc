//! Fuzz target for the hex word boundary
//!
//! # Invariants
//!
//! - NEVER panic on arbitrary input
//! - Accept ONLY strings of exactly four hex digits
//! - Accepted input re-encodes to its lowercase form
//! - A malformed word is never read as zero

#![no_main]

use libfuzzer_sys::fuzz_target;
use serpent_core::{decode_word, encode_word};

fuzz_target!(|input: &str| {
    let well_formed = input.len() == 4 && input.bytes().all(|b| b.is_ascii_hexdigit());

    match decode_word(input) {
        Ok(word) => {
            assert!(well_formed, "accepted malformed input {input:?}");
            assert_eq!(encode_word(word), input.to_ascii_lowercase());
        },
        Err(_) => assert!(!well_formed, "rejected well-formed input {input:?}"),
    }
});
