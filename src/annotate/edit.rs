use crate::annotate::{char_bounds, fits, AnnotateError};
use crate::Match;

/// A resolved replacement over a half-open character range of the original
/// text. Built internally from matches; `start`/`end` never shift because
/// batch application splices right-to-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

/// Apply the top replacement of every usable match to `text`.
///
/// A match is usable when its range fits the text and it carries at least
/// one replacement candidate; anything else is skipped. Edits are sorted
/// descending by start and spliced right-to-left, so every splice leaves the
/// byte offsets of the edits still to come untouched. The edit set must be
/// pairwise disjoint; overlapping edits are rejected with
/// [`AnnotateError::OverlappingEdits`] before any splicing happens.
///
/// An empty or fully-unusable match list returns the text unchanged.
pub fn apply(text: &str, matches: &[Match]) -> Result<String, AnnotateError> {
    let bounds = char_bounds(text);
    let mut edits: Vec<Edit> = matches
        .iter()
        .filter(|m| fits(m, bounds.len()))
        .filter_map(|m| {
            Some(Edit {
                start: m.offset,
                end: m.offset + m.length,
                replacement: m.replacements.first()?.clone(),
            })
        })
        .collect();

    if edits.is_empty() {
        return Ok(text.to_string());
    }

    edits.sort_by(|a, b| b.start.cmp(&a.start));
    for pair in edits.windows(2) {
        // sorted descending: the later entry lies further left
        if pair[1].end > pair[0].start {
            return Err(AnnotateError::OverlappingEdits {
                first_start: pair[1].start,
                first_end: pair[1].end,
                second_start: pair[0].start,
                second_end: pair[0].end,
            });
        }
    }

    let mut out = text.to_string();
    for edit in &edits {
        out.replace_range(bounds[edit.start]..bounds[edit.end], &edit.replacement);
    }
    Ok(out)
}

/// Splice a single chosen replacement into `text` over the character range
/// `[start, end)`. This is the path taken when the user picks one suggestion
/// from a flagged segment.
pub fn apply_one(
    text: &str,
    start: usize,
    end: usize,
    replacement: &str,
) -> Result<String, AnnotateError> {
    let bounds = char_bounds(text);
    let len = bounds.len() - 1;
    if start > end || end >= bounds.len() {
        return Err(AnnotateError::RangeOutOfBounds { start, end, len });
    }

    let mut out = text.to_string();
    out.replace_range(bounds[start]..bounds[end], replacement);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(offset: usize, length: usize, fixes: &[&str]) -> Match {
        Match {
            offset,
            length,
            message: "test".to_string(),
            replacements: fixes.iter().map(|s| s.to_string()).collect(),
            rule: None,
        }
    }

    #[test]
    fn empty_match_list_is_identity() {
        assert_eq!(apply("unchanged", &[]).unwrap(), "unchanged");
    }

    #[test]
    fn single_replacement() {
        let out = apply("Helo wrld", &[m(0, 4, &["Hello"])]).unwrap();
        assert_eq!(out, "Hello wrld");
    }

    #[test]
    fn multiple_disjoint_edits() {
        let matches = [m(0, 4, &["Hello"]), m(5, 4, &["world"])];
        assert_eq!(apply("Helo wrld", &matches).unwrap(), "Hello world");
    }

    #[test]
    fn batch_apply_is_order_independent() {
        let forward = [m(0, 4, &["Hello"]), m(5, 4, &["world"])];
        let reverse = [m(5, 4, &["world"]), m(0, 4, &["Hello"])];
        assert_eq!(
            apply("Helo wrld", &forward).unwrap(),
            apply("Helo wrld", &reverse).unwrap()
        );
    }

    #[test]
    fn growing_replacement_does_not_shift_leftward_edit() {
        // rightmost edit grows the string; left edit offsets must stay valid
        let matches = [m(0, 1, &["AA"]), m(4, 1, &["EEEE"])];
        assert_eq!(apply("abcde", &matches).unwrap(), "AAbcdEEEE");
    }

    #[test]
    fn match_without_replacement_is_skipped() {
        let matches = [m(0, 4, &[]), m(5, 4, &["world"])];
        assert_eq!(apply("Helo wrld", &matches).unwrap(), "Helo world");
    }

    #[test]
    fn out_of_range_match_is_skipped() {
        let matches = [m(40, 2, &["nope"])];
        assert_eq!(apply("short", &matches).unwrap(), "short");
    }

    #[test]
    fn huge_offset_does_not_overflow() {
        let matches = [m(usize::MAX, 2, &["nope"])];
        assert_eq!(apply("abc", &matches).unwrap(), "abc");
    }

    #[test]
    fn overlapping_edits_are_rejected() {
        let matches = [m(0, 3, &["x"]), m(1, 3, &["y"])];
        let err = apply("abcdef", &matches).unwrap_err();
        assert!(matches!(err, AnnotateError::OverlappingEdits { .. }));
    }

    #[test]
    fn adjacent_edits_are_not_overlapping() {
        let matches = [m(0, 2, &["X"]), m(2, 2, &["Y"])];
        assert_eq!(apply("abcd", &matches).unwrap(), "XY");
    }

    #[test]
    fn first_candidate_is_preferred() {
        let out = apply("teh", &[m(0, 3, &["the", "tech"])]).unwrap();
        assert_eq!(out, "the");
    }

    #[test]
    fn multibyte_text_splices_on_char_offsets() {
        // "naïve" has 5 chars, 6 bytes; replace chars [0,5)
        let out = apply("naïve code", &[m(0, 5, &["careful"])]).unwrap();
        assert_eq!(out, "careful code");
    }

    #[test]
    fn apply_one_splices_range() {
        assert_eq!(apply_one("Helo wrld", 5, 9, "world").unwrap(), "Helo world");
    }

    #[test]
    fn apply_one_rejects_bad_range() {
        let err = apply_one("abc", 2, 9, "x").unwrap_err();
        assert_eq!(
            err,
            AnnotateError::RangeOutOfBounds {
                start: 2,
                end: 9,
                len: 3
            }
        );
    }

    #[test]
    fn apply_one_at_full_range() {
        assert_eq!(apply_one("abc", 0, 3, "xyz").unwrap(), "xyz");
    }
}
