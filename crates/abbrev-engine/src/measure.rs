//! Measurement grammar shared by the pattern detector, rule passes and truncator.

use regex::Regex;
use std::sync::LazyLock;

/// Inch/foot tokens as they appear in lineset layouts: a paired `A" x B"`
/// dimension (group 1 and 2), a single inch value, or a foot value.
pub static DIMENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\d+(?:/\d+)?")(?:\s*[xX×]\s*|\s+)(\d+(?:/\d+)?")|\d+(?:/\d+)?"|\d+'"#).unwrap()
});

/// Any numeric value with an optional fraction, optional paired second value
/// and optional unit mark.
pub static MEASUREMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\d+(?:[./]\d+)?(?:\s*["'])?(?:\s*[xX×]\s*\d+(?:[./]\d+)?(?:\s*["'])?)?"#).unwrap()
});

/// A length in feet, e.g. `25'`.
pub static FEET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\s*'").unwrap());

/// Words carrying a digit, quote, period or slash are measurements or codes
/// and must never be shortened.
pub fn is_protected_word(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit() || matches!(c, '"' | '\'' | '.' | '/'))
}

/// True if `text` contains any measurement token.
pub fn contains_measurement(text: &str) -> bool {
    MEASUREMENT.is_match(text)
}
