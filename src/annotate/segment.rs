use crate::annotate::{char_bounds, fits};
use crate::Match;

/// A contiguous slice of the checked text. Segments partition the input:
/// concatenating their `text` fields in order reconstructs it exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub flag: Option<Flag>,
}

/// Annotation carried by a flagged segment. `start`/`end` are half-open
/// character offsets into the original text, so a renderer can hand them
/// back to [`crate::annotate::apply_one`] when the user picks a replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub start: usize,
    pub end: usize,
    pub message: String,
    pub replacements: Vec<String>,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Segment {
            text: text.to_string(),
            flag: None,
        }
    }

    pub fn is_flagged(&self) -> bool {
        self.flag.is_some()
    }
}

/// Partition `text` into plain and flagged segments for rendering.
///
/// Matches are sorted ascending by start; when two start at the same offset
/// the longer span wins. Overlaps are resolved greedily: a match starting
/// before the scan cursor (inside an already-emitted flagged segment) is
/// dropped, so the first match in sort order keeps its region. Matches whose
/// range does not fit the text are skipped. Empty text yields no segments;
/// no usable matches yields a single plain segment covering the whole text.
pub fn resolve(text: &str, matches: &[Match]) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }

    let bounds = char_bounds(text);
    let mut ranges: Vec<&Match> = matches
        .iter()
        .filter(|m| fits(m, bounds.len()))
        .collect();
    ranges.sort_by(|a, b| {
        a.offset
            .cmp(&b.offset)
            .then_with(|| b.length.cmp(&a.length))
    });

    let mut segments = Vec::new();
    let mut cursor = 0usize; // char units
    for m in ranges {
        if m.offset < cursor {
            // overlaps a segment already emitted
            continue;
        }
        if m.offset > cursor {
            segments.push(Segment::plain(&text[bounds[cursor]..bounds[m.offset]]));
        }
        let end = m.offset + m.length;
        segments.push(Segment {
            text: text[bounds[m.offset]..bounds[end]].to_string(),
            flag: Some(Flag {
                start: m.offset,
                end,
                message: m.message.clone(),
                replacements: m.replacements.clone(),
            }),
        });
        cursor = end;
    }

    let total = bounds.len() - 1;
    if cursor < total {
        segments.push(Segment::plain(&text[bounds[cursor]..]));
    }

    segments
}
