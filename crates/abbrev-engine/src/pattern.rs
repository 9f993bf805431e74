//! Specialized layouts that get a bespoke condensed rendering.
//!
//! A pattern keeps every measurement it recognizes, even when that means the
//! rendering is longer than the requested target.

use regex::{Match, Regex};
use std::sync::LazyLock;

use crate::measure::{DIMENSION, FEET};
use crate::text::{char_len, normalize_whitespace};

pub const LINESET_TAG: &str = "Specialized lineset formatting";

/// Leading token of every lineset rendering.
pub const LINESET_PREFIX: &str = "Cop Lin";

/// Max distance, in chars, from the end of a role marker to the start of its
/// measurement.
pub const ROLE_PROXIMITY: usize = 15;

static LINESET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(copper\s+)?linesets?").unwrap());

static ROLES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"(?i)\bsuction\s+lines?\b").unwrap(), "Suc Ln"),
        (Regex::new(r"(?i)\bliquid\s+lines?\b").unwrap(), "Liq Ln"),
        (Regex::new(r"(?i)\bdischarge\s+lines?\b").unwrap(), "Dis Ln"),
    ]
});

/// Output of a matched pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub pattern: &'static str,
    pub text: String,
    pub applied_rules: Vec<String>,
}

pub trait SpecializedPattern: Send + Sync {
    fn name(&self) -> &'static str;
    fn detect(&self, text: &str) -> Option<PatternMatch>;
}

/// Refrigerant lineset descriptions: marker, paired dimension, line roles
/// with their sizes, and overall length in feet.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinesetPattern;

impl SpecializedPattern for LinesetPattern {
    fn name(&self) -> &'static str {
        "lineset"
    }

    fn detect(&self, text: &str) -> Option<PatternMatch> {
        if !LINESET.is_match(text) {
            return None;
        }
        let mut parts: Vec<&str> = vec![LINESET_PREFIX];

        let dimensions: Vec<(Match, bool)> = DIMENSION
            .captures_iter(text)
            .filter_map(|c| c.get(0).map(|m| (m, c.get(1).is_some())))
            .collect();
        let mut used: Vec<(usize, usize)> = Vec::new();

        if let Some((m, _)) = dimensions.iter().find(|(_, paired)| *paired) {
            parts.push(m.as_str());
            used.push((m.start(), m.end()));
        }

        for (role, label) in ROLES.iter() {
            let Some(found) = role.find(text) else { continue };
            parts.push(*label);
            let nearby = dimensions.iter().map(|(m, _)| m).find(|m| {
                m.start() >= found.end() && char_len(&text[found.end()..m.start()]) <= ROLE_PROXIMITY
            });
            if let Some(m) = nearby {
                parts.push(m.as_str());
                used.push((m.start(), m.end()));
            }
        }

        if let Some(feet) = FEET.find(text) {
            let already = used.iter().any(|(s, e)| *s <= feet.start() && feet.end() <= *e);
            if !already {
                parts.push(feet.as_str());
            }
        }

        Some(PatternMatch {
            pattern: self.name(),
            text: normalize_whitespace(&parts.join(" ")),
            applied_rules: vec![LINESET_TAG.to_string()],
        })
    }
}

/// Runs registered patterns in order; the first match wins.
pub struct PatternDetector {
    patterns: Vec<Box<dyn SpecializedPattern>>,
}

impl PatternDetector {
    pub fn new() -> Self {
        Self { patterns: Vec::new() }
    }

    pub fn with_pattern(mut self, pattern: impl SpecializedPattern + 'static) -> Self {
        self.patterns.push(Box::new(pattern));
        self
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn detect(&self, text: &str) -> Option<PatternMatch> {
        self.patterns.iter().find_map(|p| p.detect(text))
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new().with_pattern(LinesetPattern)
    }
}
