//! Text rendering of words as 4x4 bit grids.

use serpent_core::{WORD_BITS, Word};

const SET: char = '█';
const CLEAR: char = '░';

/// Render `word` as four rows of four cells.
///
/// Bit `i` lands at row `i / 4`, column `i % 4`, so the least significant
/// bit is the top-left cell.
pub fn render_bit_grid(word: Word) -> String {
    (0..WORD_BITS)
        .collect::<Vec<_>>()
        .chunks(4)
        .map(|row| {
            row.iter()
                .map(|&bit| if (word >> bit) & 1 == 1 { SET } else { CLEAR })
                .map(String::from)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
