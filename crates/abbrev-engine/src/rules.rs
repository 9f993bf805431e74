//! Rule engine: ordered reduction passes with early exit.
//!
//! Passes:
//! 1. Dictionary substitution
//! 2. Phrase substitution
//! 3. Parenthetical stripping (measurement-bearing spans are kept)
//! 4. Long-word truncation (measurements and codes are kept)
//! 5. Segment prioritization
//! 6. Final truncation

use abbrev_core::{AbbrevError, Result};
use regex::Regex;
use std::sync::{Arc, LazyLock};

use crate::dictionary::Dictionary;
use crate::measure::{contains_measurement, is_protected_word, MEASUREMENT};
use crate::phrases::PhraseTable;
use crate::text::{byte_offset, char_index, char_len, normalize_whitespace, take_chars};
use crate::truncate::{extend_to_space, truncate_detailed, TruncationKind, MEASUREMENT_TOLERANCE};

pub const DICTIONARY_TAG: &str = "Applied dictionary abbreviations";
pub const PHRASE_TAG: &str = "Replaced common phrases";
pub const PARENTHESES_TAG: &str = "Removed text in parentheses";
pub const LONG_WORDS_TAG: &str = "Abbreviated long words";
pub const SEGMENTS_TAG: &str = "Prioritized different parts of text";
pub const MEASUREMENT_EXTENSION_TAG: &str = "Truncated after nearby measurement";
pub const SMART_TRUNCATION_TAG: &str = "Smart truncation applied";
pub const HARD_TRUNCATION_TAG: &str = "Hard truncation applied";
pub const SEVERE_TRUNCATION_TAG: &str = "Truncated entire phrase";

/// Segment words longer than this are cut to [`SEGMENT_WORD_PREFIX`] chars.
const SEGMENT_WORD_MAX: usize = 4;
const SEGMENT_WORD_PREFIX: usize = 3;
/// Below this remaining budget no further segments are added.
const SEGMENT_MIN_BUDGET: usize = 3;
/// A space this close after an extended measurement is included.
const EXTENSION_SPACE: usize = 3;

static PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^()]*\)").unwrap());

/// Text plus the tags of the passes that changed it, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    pub text: String,
    pub applied_rules: Vec<String>,
}

/// Shortens text toward a target length.
pub trait Reducer: Send + Sync {
    fn reduce(&self, dictionary: &Dictionary, text: &str, target_length: usize) -> Result<Reduction>;
}

/// One rule pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Dictionary,
    Phrases,
    Parentheticals,
    LongWords,
    Segments,
}

impl Pass {
    pub const ALL: [Pass; 5] = [Pass::Dictionary, Pass::Phrases, Pass::Parentheticals, Pass::LongWords, Pass::Segments];

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Dictionary => DICTIONARY_TAG,
            Self::Phrases => PHRASE_TAG,
            Self::Parentheticals => PARENTHESES_TAG,
            Self::LongWords => LONG_WORDS_TAG,
            Self::Segments => SEGMENTS_TAG,
        }
    }
}

/// The deterministic rule-based reducer.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    phrases: Arc<PhraseTable>,
}

impl RuleEngine {
    pub fn new(phrases: PhraseTable) -> Self {
        Self { phrases: Arc::new(phrases) }
    }

    /// Apply a single pass. Output is whitespace-normalized.
    pub fn apply_pass(&self, pass: Pass, dictionary: &Dictionary, text: &str, target_length: usize) -> String {
        let out = match pass {
            Pass::Dictionary => dictionary.substitute(text),
            Pass::Phrases => self.phrases.apply(text),
            Pass::Parentheticals => strip_parentheticals(text),
            Pass::LongWords => abbreviate_long_words(text),
            Pass::Segments => prioritize_segments(text, target_length),
        };
        normalize_whitespace(&out)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(PhraseTable::default())
    }
}

impl Reducer for RuleEngine {
    fn reduce(&self, dictionary: &Dictionary, text: &str, target_length: usize) -> Result<Reduction> {
        let mut current = normalize_whitespace(text);
        let mut applied = Vec::new();

        for pass in Pass::ALL {
            if char_len(&current) <= target_length {
                return Ok(Reduction { text: current, applied_rules: applied });
            }
            let next = self.apply_pass(pass, dictionary, &current, target_length);
            if char_len(&next) > char_len(&current) {
                return Err(AbbrevError::processing(format!(
                    "pass {:?} grew text from {} to {} chars",
                    pass,
                    char_len(&current),
                    char_len(&next)
                )));
            }
            if next != current {
                tracing::trace!(?pass, from = char_len(&current), to = char_len(&next), "rule pass applied");
                applied.push(pass.tag().to_string());
                current = next;
            }
        }

        if char_len(&current) > target_length {
            let (text, tag) = final_truncation(&current, target_length);
            applied.push(tag.to_string());
            current = normalize_whitespace(&text);
        }

        Ok(Reduction { text: current, applied_rules: applied })
    }
}

/// Remove `( ... )` spans that carry no measurement.
pub fn strip_parentheticals(text: &str) -> String {
    if !(text.contains('(') && text.contains(')')) {
        return text.to_string();
    }
    PARENTHETICAL
        .replace_all(text, |caps: &regex::Captures| {
            let span = &caps[0];
            if contains_measurement(span) { span.to_string() } else { String::new() }
        })
        .into_owned()
}

/// Prefix length kept for a word of `len` chars, if it should be shortened.
fn long_word_prefix(len: usize) -> Option<usize> {
    match len {
        n if n > 7 => Some(3),
        n if n > 5 => Some(4),
        _ => None,
    }
}

fn shorten_piece(piece: &str) -> String {
    match long_word_prefix(char_len(piece)) {
        Some(keep) => take_chars(piece, keep).to_string(),
        None => piece.to_string(),
    }
}

/// Shorten one word; hyphenated parts are shortened separately and trailing
/// `,`/`;`/`:` is kept.
fn shorten_word(word: &str) -> String {
    if is_protected_word(word) {
        return word.to_string();
    }
    let stem = word.trim_end_matches([',', ';', ':']);
    let suffix = &word[stem.len()..];
    let shortened = stem.split('-').map(shorten_piece).collect::<Vec<_>>().join("-");
    format!("{shortened}{suffix}")
}

/// Cut every unprotected word longer than five chars to a short prefix.
pub fn abbreviate_long_words(text: &str) -> String {
    text.split_whitespace().map(shorten_word).collect::<Vec<_>>().join(" ")
}

fn is_separator(c: char) -> bool {
    matches!(c, '-' | ',' | ';')
}

/// Fit as many words of `segment` as `budget` allows, shortening plain words.
fn squeeze_segment(segment: &str, budget: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for word in segment.split_whitespace() {
        let piece = if is_protected_word(word) || char_len(word) <= SEGMENT_WORD_MAX {
            word
        } else {
            take_chars(word, SEGMENT_WORD_PREFIX)
        };
        let sep = usize::from(!out.is_empty());
        if used + sep + char_len(piece) > budget {
            break;
        }
        if sep == 1 {
            out.push(' ');
        }
        out.push_str(piece);
        used += sep + char_len(piece);
    }
    out
}

/// Keep the first segment whole; fit later segments into what budget is
/// left, verbatim when possible, squeezed otherwise.
pub fn prioritize_segments(text: &str, target_length: usize) -> String {
    let mut segments = Vec::new();
    let mut separators = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if is_separator(c) {
            segments.push(&text[start..i]);
            separators.push(c);
            start = i + c.len_utf8();
        }
    }
    segments.push(&text[start..]);
    if segments.len() < 2 {
        return text.to_string();
    }

    let first = segments[0].trim();
    let mut out = first.to_string();
    let mut current = char_len(first);

    for (segment, sep) in segments[1..].iter().zip(separators) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let remaining = target_length.saturating_sub(current + 1);
        if remaining <= SEGMENT_MIN_BUDGET {
            break;
        }
        let piece = if char_len(segment) <= remaining {
            segment.to_string()
        } else {
            squeeze_segment(segment, remaining)
        };
        if piece.is_empty() {
            continue;
        }
        out.push(sep);
        out.push_str(&piece);
        current += char_len(&piece) + 1;
    }
    out
}

/// Last resort: keep a measurement that ends just past the limit, otherwise
/// hand off to the truncator.
fn final_truncation(text: &str, target_length: usize) -> (String, &'static str) {
    if let Some(end) = measurement_extension(text, target_length) {
        return (text[..end].trim_end().to_string(), MEASUREMENT_EXTENSION_TAG);
    }
    let before = char_len(text);
    let cut = truncate_detailed(text, target_length);
    let dropped = before.saturating_sub(char_len(&cut.text));
    let tag = if dropped * 2 > before {
        SEVERE_TRUNCATION_TAG
    } else {
        match cut.kind {
            TruncationKind::HardCut => HARD_TRUNCATION_TAG,
            _ => SMART_TRUNCATION_TAG,
        }
    };
    (cut.text, tag)
}

/// Byte offset just past the first measurement that crosses or follows the
/// limit and ends within the tolerance.
fn measurement_extension(text: &str, target_length: usize) -> Option<usize> {
    let limit = byte_offset(text, target_length);
    let m = MEASUREMENT.find_iter(text).find(|m| {
        m.end() > limit && char_index(text, m.end()) <= target_length + MEASUREMENT_TOLERANCE
    })?;
    Some(extend_to_space(text, m.end(), EXTENSION_SPACE))
}
