//! Crowned-prime stage: keyed XORs derived from (prime, weight) pairs.

use crate::{TraceRecord, Word, ops::xor_with_key};

/// A (prime, weight) pair whose product keys an XOR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CrownedPrime {
    /// Small prime multiplier.
    pub prime: u16,
    /// 16-bit weight.
    pub weight: Word,
}

impl CrownedPrime {
    /// Create a crowned prime. Primality is checked by
    /// [`PipelineConfig::new`](crate::PipelineConfig::new).
    pub const fn new(prime: u16, weight: Word) -> Self {
        Self { prime, weight }
    }

    /// XOR key: `prime * weight` wrapped to 16 bits.
    pub const fn key(self) -> Word {
        self.prime.wrapping_mul(self.weight)
    }
}

/// Apply each crowned prime's keyed XOR in list order.
///
/// XOR commutes, so the result does not depend on the order of `crowns`;
/// the order only fixes the order of the returned records.
pub fn apply_crowns(word: Word, crowns: &[CrownedPrime]) -> (Word, Vec<TraceRecord>) {
    let mut records = Vec::with_capacity(crowns.len());
    let mut current = word;

    for crown in crowns {
        let before = current;
        let key = crown.key();
        current = xor_with_key(current, key);
        records.push(TraceRecord::CrownApplied {
            prime: crown.prime,
            weight: crown.weight,
            key,
            before,
            after: current,
        });
    }

    (current, records)
}

/// Trial-division primality test for crowned-prime validation.
pub(crate) fn is_prime(n: u16) -> bool {
    if n < 2 {
        return false;
    }
    let n = u32::from(n);
    (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}
