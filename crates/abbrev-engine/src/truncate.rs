//! Boundary- and measurement-aware truncation.
//!
//! No ellipsis or other marker is appended; a caller that wants one must
//! reserve its length out of the budget.

use crate::measure::MEASUREMENT;
use crate::text::{byte_offset, char_index, char_len, take_chars};

/// How far past the limit a measurement may end and still be kept whole.
pub const MEASUREMENT_TOLERANCE: usize = 10;
/// How far past the limit to scan for measurements.
const MEASUREMENT_LOOKAHEAD: usize = 15;
/// A space this close after a kept measurement extends the cut to it.
const SPACE_EXTENSION: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncationKind {
    /// Text already fit.
    None,
    /// Cut right after a measurement token, possibly past the limit.
    Measurement,
    /// Cut on a whitespace boundary.
    WordBoundary,
    /// Cut at exactly the limit, mid-word.
    HardCut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncation {
    pub text: String,
    pub kind: TruncationKind,
}

/// Truncate `text` to about `length` chars.
pub fn truncate(text: &str, length: usize) -> String {
    truncate_detailed(text, length).text
}

/// Truncate and report which policy produced the cut.
///
/// In order: keep the last measurement ending within `length + 10` chars
/// (only if that keeps at least half the budget); else cut at `length` and
/// back off to the last whitespace if it sits at or past half of `length`;
/// else hard-cut at `length`.
pub fn truncate_detailed(text: &str, length: usize) -> Truncation {
    if char_len(text) <= length {
        return Truncation { text: text.to_string(), kind: TruncationKind::None };
    }

    if let Some(end) = measurement_cut(text, length) {
        return Truncation { text: text[..end].trim().to_string(), kind: TruncationKind::Measurement };
    }

    let cut = byte_offset(text, length);
    let head = &text[..cut];
    if text[cut..].chars().next().is_some_and(char::is_whitespace) {
        return Truncation { text: head.trim().to_string(), kind: TruncationKind::WordBoundary };
    }
    if let Some(space) = head.rfind(char::is_whitespace) {
        if char_index(head, space) * 2 >= length {
            return Truncation { text: head[..space].trim().to_string(), kind: TruncationKind::WordBoundary };
        }
    }
    Truncation { text: head.trim().to_string(), kind: TruncationKind::HardCut }
}

/// Byte offset to cut at so the last usable measurement stays whole.
fn measurement_cut(text: &str, length: usize) -> Option<usize> {
    let window = take_chars(text, length + MEASUREMENT_LOOKAHEAD);
    let end = MEASUREMENT
        .find_iter(window)
        .map(|m| m.end())
        .filter(|&end| {
            let chars = char_index(window, end);
            chars <= length + MEASUREMENT_TOLERANCE && chars * 2 >= length
        })
        .last()?;
    Some(extend_to_space(text, end, SPACE_EXTENSION))
}

/// Move `end` forward to the next space if one follows within `max_chars`.
pub(crate) fn extend_to_space(text: &str, end: usize, max_chars: usize) -> usize {
    match text[end..].find(' ') {
        Some(rel) if char_len(&text[end..end + rel]) < max_chars => end + rel,
        _ => end,
    }
}
