//! Primitive bit operations on 16-bit words.
//!
//! Every primitive is pure, total and width-preserving. Shift counts are
//! reduced modulo [`WORD_BITS`] before use.

use std::fmt;

/// The unit of data flowing through every stage.
pub type Word = u16;

/// Width of a [`Word`] in bits.
pub const WORD_BITS: u32 = Word::BITS;

/// Circular left shift by `bits` positions (taken modulo 16).
pub fn rotate_left(word: Word, bits: u32) -> Word {
    word.rotate_left(bits % WORD_BITS)
}

/// Circular right shift by `bits` positions (taken modulo 16).
pub fn rotate_right(word: Word, bits: u32) -> Word {
    word.rotate_right(bits % WORD_BITS)
}

/// Bitwise XOR with `key`.
pub fn xor_with_key(word: Word, key: Word) -> Word {
    word ^ key
}

/// Bitwise complement.
pub fn invert_bits(word: Word) -> Word {
    !word
}

/// XOR with the reflector's mask.
pub fn reflect(word: Word, reflector: Reflector) -> Word {
    word ^ reflector.mask
}

/// A named constant mask used by reflection stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reflector {
    /// Name shown in traces.
    pub name: &'static str,
    /// Mask applied to the word with XOR.
    pub mask: Word,
}

impl Reflector {
    /// All-zero reflector. Reflecting with it is the identity.
    pub const ZEROS: Self = Self { name: "000", mask: 0x0000 };

    /// All-one reflector. Reflecting with it inverts every bit.
    pub const ONES: Self = Self { name: "FFF", mask: 0xFFFF };
}

impl fmt::Display for Reflector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REFLECTOR_{}", self.name)
    }
}

/// A primitive operation with its parameters.
///
/// Operations are plain data so a trace can always say which operation ran
/// and with what arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Circular left shift.
    RotateLeft(u32),
    /// Circular right shift.
    RotateRight(u32),
    /// XOR with a key.
    XorWithKey(Word),
    /// Bitwise complement.
    InvertBits,
    /// XOR with a reflector mask.
    Reflect(Reflector),
}

impl Operation {
    /// Apply the operation to `word`.
    pub fn apply(self, word: Word) -> Word {
        match self {
            Self::RotateLeft(bits) => rotate_left(word, bits),
            Self::RotateRight(bits) => rotate_right(word, bits),
            Self::XorWithKey(key) => xor_with_key(word, key),
            Self::InvertBits => invert_bits(word),
            Self::Reflect(reflector) => reflect(word, reflector),
        }
    }

    /// Short name of the operation, without parameters.
    pub fn name(self) -> &'static str {
        match self {
            Self::RotateLeft(_) => "rotate_left",
            Self::RotateRight(_) => "rotate_right",
            Self::XorWithKey(_) => "xor_with_key",
            Self::InvertBits => "invert_bits",
            Self::Reflect(_) => "reflect",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RotateLeft(bits) | Self::RotateRight(bits) => {
                write!(f, "{}({})", self.name(), bits)
            },
            Self::XorWithKey(key) => write!(f, "{}(0x{:04x})", self.name(), key),
            Self::InvertBits => f.write_str(self.name()),
            Self::Reflect(reflector) => write!(f, "{}({})", self.name(), reflector),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn rotate_by_zero_is_identity() {
        assert_eq!(rotate_left(0xBEEF, 0), 0xBEEF);
        assert_eq!(rotate_right(0xBEEF, 0), 0xBEEF);
    }

    #[test]
    fn rotate_count_wraps_modulo_width() {
        assert_eq!(rotate_left(0x1234, 16), 0x1234);
        assert_eq!(rotate_left(0x1234, 19), rotate_left(0x1234, 3));
        assert_eq!(rotate_right(0x1234, 34), rotate_right(0x1234, 2));
    }

    #[test]
    fn rotate_left_carries_high_bits_around() {
        assert_eq!(rotate_left(0x8001, 1), 0x0003);
        assert_eq!(rotate_right(0x8001, 1), 0xC000);
    }

    #[test]
    fn zero_reflector_is_identity() {
        assert_eq!(reflect(0x5A5A, Reflector::ZEROS), 0x5A5A);
        assert_eq!(reflect(0x5A5A, Reflector::ONES), 0xA5A5);
    }

    #[test]
    fn operation_display_names_parameters() {
        assert_eq!(Operation::RotateLeft(3).to_string(), "rotate_left(3)");
        assert_eq!(Operation::XorWithKey(0x0333).to_string(), "xor_with_key(0x0333)");
        assert_eq!(Operation::InvertBits.to_string(), "invert_bits");
        assert_eq!(Operation::Reflect(Reflector::ONES).to_string(), "reflect(REFLECTOR_FFF)");
    }

    proptest! {
        #[test]
        fn rotations_are_inverse(word: Word, bits in 0u32..16) {
            prop_assert_eq!(rotate_left(rotate_right(word, bits), bits), word);
            prop_assert_eq!(rotate_right(rotate_left(word, bits), bits), word);
        }

        #[test]
        fn invert_is_involutive(word: Word) {
            prop_assert_eq!(invert_bits(invert_bits(word)), word);
        }

        #[test]
        fn xor_and_reflect_are_involutive(word: Word, key: Word) {
            prop_assert_eq!(xor_with_key(xor_with_key(word, key), key), word);

            let reflector = Reflector { name: "test", mask: key };
            prop_assert_eq!(reflect(reflect(word, reflector), reflector), word);
        }

        #[test]
        fn operation_apply_matches_primitives(word: Word, bits: u32, key: Word) {
            prop_assert_eq!(Operation::RotateLeft(bits).apply(word), rotate_left(word, bits));
            prop_assert_eq!(Operation::RotateRight(bits).apply(word), rotate_right(word, bits));
            prop_assert_eq!(Operation::XorWithKey(key).apply(word), word ^ key);
            prop_assert_eq!(Operation::InvertBits.apply(word), !word);
        }
    }
}
