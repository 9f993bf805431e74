//! Verification scorer: rates an abbreviation from its text and rule tags.

use abbrev_core::VerificationReport;

use crate::rules::SEVERE_TRUNCATION_TAG;
use crate::text::char_len;

/// Target assumed when the caller does not supply one.
pub const DEFAULT_TARGET_LENGTH: usize = 30;

pub const SEVERE_SUGGESTION: &str = "severely truncated, meaning may be lost";
pub const NON_STANDARD_SUGGESTION: &str = "contains non-standard abbreviations";
pub const READABILITY_SUGGESTION: &str = "some abbreviations may not be easily recognized";

/// Score against the default target length.
pub fn verify(original: &str, abbreviated: &str, applied_rules: &[String]) -> VerificationReport {
    verify_with_target(original, abbreviated, applied_rules, DEFAULT_TARGET_LENGTH)
}

/// Score an abbreviation. Pure; depends only on its arguments.
///
/// Text returned unchanged with no rules applied counts as within budget.
/// Degraded results carry an error tag and are scored on their length.
pub fn verify_with_target(
    original: &str,
    abbreviated: &str,
    applied_rules: &[String],
    target_length: usize,
) -> VerificationReport {
    let severe = applied_rules.iter().any(|r| r.contains(SEVERE_TRUNCATION_TAG));
    let truncated = applied_rules.iter().any(|r| r.to_lowercase().contains("truncat"));
    let untouched = original == abbreviated && applied_rules.is_empty();
    let within_budget = char_len(abbreviated) <= target_length || untouched;
    let meaning_preserved = !severe;

    let readability = if severe {
        0.3
    } else if truncated {
        0.6
    } else if !within_budget {
        0.7
    } else {
        1.0
    };

    let base = if within_budget && !severe { 0.7 } else { 0.4 };
    let meaning_factor = if meaning_preserved { 0.2 } else { 0.0 };
    let standard_factor = if truncated { 0.0 } else { 0.1 };
    let confidence = f64::min(base + meaning_factor + standard_factor, 1.0);

    let mut suggestions = Vec::new();
    if severe {
        suggestions.push(SEVERE_SUGGESTION.to_string());
    }
    if truncated {
        suggestions.push(NON_STANDARD_SUGGESTION.to_string());
    }
    if readability < 0.7 {
        suggestions.push(READABILITY_SUGGESTION.to_string());
    }

    VerificationReport {
        confidence: round2(confidence),
        readability: round2(readability),
        meaning_preserved,
        is_standard: !truncated,
        suggestions,
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
