//! Hex encoding of words at the exchange boundary.
//!
//! Words travel between agents as exactly four lowercase hex digits,
//! zero-padded. Decoding accepts either case but nothing else: no `0x`
//! prefix, no surrounding whitespace, no short or long forms.

use crate::{Word, error::DecodeError};

/// Number of hex digits in an encoded word.
pub const ENCODED_LEN: usize = 4;

/// Encode a word as four lowercase hex digits.
pub fn encode_word(word: Word) -> String {
    hex::encode(word.to_be_bytes())
}

/// Decode exactly four hex digits into a word.
pub fn decode_word(input: &str) -> Result<Word, DecodeError> {
    let len = input.chars().count();
    if len != ENCODED_LEN {
        return Err(DecodeError::WrongLength { input: input.to_string(), len });
    }

    let mut bytes = [0u8; 2];
    hex::decode_to_slice(input, &mut bytes)
        .map_err(|source| DecodeError::InvalidHex { input: input.to_string(), source })?;

    Ok(Word::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn encodes_zero_padded_lowercase() {
        assert_eq!(encode_word(0x0001), "0001");
        assert_eq!(encode_word(0x73AF), "73af");
        assert_eq!(encode_word(0xFFFF), "ffff");
    }

    #[test]
    fn decodes_either_case() {
        assert_eq!(decode_word("00e5"), Ok(0x00E5));
        assert_eq!(decode_word("00E5"), Ok(0x00E5));
    }

    #[test]
    fn rejects_short_input() {
        assert!(matches!(decode_word("83"), Err(DecodeError::WrongLength { len: 2, .. })));
        assert!(matches!(decode_word(""), Err(DecodeError::WrongLength { len: 0, .. })));
    }

    #[test]
    fn rejects_wide_input_instead_of_masking() {
        assert!(matches!(decode_word("94eeb5ec"), Err(DecodeError::WrongLength { len: 8, .. })));
    }

    #[test]
    fn rejects_non_hex_digits() {
        assert!(matches!(decode_word("00g1"), Err(DecodeError::InvalidHex { .. })));
        assert!(matches!(decode_word("0x12"), Err(DecodeError::InvalidHex { .. })));
        assert!(matches!(decode_word(" 123"), Err(DecodeError::InvalidHex { .. })));
    }

    #[test]
    fn rejects_multibyte_input_without_panicking() {
        assert!(decode_word("é12").is_err());
        assert!(decode_word("ééé").is_err());
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(word: Word) {
            prop_assert_eq!(decode_word(&encode_word(word)), Ok(word));
        }

        #[test]
        fn decode_never_panics(input in ".{0,8}") {
            let _ = decode_word(&input);
        }
    }
}
