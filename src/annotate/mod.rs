//! The annotation engine: pure functions that turn text plus grammar matches
//! into render-ready segments (`segment`) or corrected text (`edit`).
//!
//! Offsets arriving from the grammar service count Unicode scalar values.
//! Both halves of the engine convert those to byte offsets exactly once,
//! against the original text, and slice by byte index from then on. A match
//! whose character range does not fit the text is unusable and contributes
//! nothing to either output.

pub mod edit;
pub mod segment;

pub use edit::{apply, apply_one, Edit};
pub use segment::{resolve, Flag, Segment};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnnotateError {
    #[error("overlapping edits: [{first_start}..{first_end}) intersects [{second_start}..{second_end})")]
    OverlappingEdits {
        first_start: usize,
        first_end: usize,
        second_start: usize,
        second_end: usize,
    },

    #[error("edit range [{start}..{end}) does not fit text of {len} characters")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },
}

/// Byte offset of every character boundary, including the trailing one at
/// `text.len()`. Index `i` is the byte position of the `i`-th character, so a
/// char range `[a, b)` maps to bytes `bounds[a]..bounds[b]`.
pub(crate) fn char_bounds(text: &str) -> Vec<usize> {
    let mut bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    bounds.push(text.len());
    bounds
}

/// Whether a match's character range fits a text with `bounds_len - 1`
/// characters. Checked addition so that absurd service offsets are merely
/// unusable, never a panic.
pub(crate) fn fits(m: &crate::Match, bounds_len: usize) -> bool {
    m.offset
        .checked_add(m.length)
        .is_some_and(|end| end < bounds_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_of_ascii() {
        assert_eq!(char_bounds("abc"), vec![0, 1, 2, 3]);
    }

    #[test]
    fn bounds_of_multibyte() {
        // 'é' is two bytes in UTF-8
        assert_eq!(char_bounds("aéb"), vec![0, 1, 3, 4]);
    }

    #[test]
    fn bounds_of_empty() {
        assert_eq!(char_bounds(""), vec![0]);
    }
}
