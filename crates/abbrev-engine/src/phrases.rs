//! Curated multi-word phrase table, applied after dictionary substitution.
//!
//! Phrases are matched against text the dictionary pass has already
//! rewritten, so entries are written in that form ("hi efficiency", not
//! "high efficiency", "per min", not "per minute"). Labels are inserted verbatim.

use regex::Regex;
use std::sync::LazyLock;

use crate::text::char_len;

pub const DEFAULT_PHRASES: &[(&str, &str)] = &[
    ("heating ventilation and air conditioning", "HVAC"),
    ("cubic feet per min", "CFM"),
    ("gallons per min", "GPM"),
    ("british thermal units", "BTU"),
    ("energy recovery ventilator", "ERV"),
    ("variable frequency drive", "VFD"),
    ("air handling unit", "AHU"),
    ("building management", "Bldg Mgmt"),
    ("air conditioning", "AC"),
    ("normally closed", "NC"),
    ("normally open", "NO"),
    ("rooftop unit", "RTU"),
    ("outdoor unit", "ODU"),
    ("indoor unit", "IDU"),
    ("power supply", "Pwr Sply"),
    ("hi efficiency", "Hi Eff"),
    ("three way", "3-Way"),
    ("two way", "2-Way"),
    ("liquid line", "Liq Ln"),
    ("suction line", "Suc Ln"),
    ("discharge line", "Dis Ln"),
];

static DEFAULT_TABLE: LazyLock<PhraseTable> = LazyLock::new(|| PhraseTable::new(DEFAULT_PHRASES));

/// Compiled phrase → label table, longest phrase first.
#[derive(Debug, Clone)]
pub struct PhraseTable {
    pairs: Vec<(Regex, String)>,
}

impl PhraseTable {
    /// Phrases whose label is not shorter than the phrase are dropped.
    pub fn new(phrases: &[(&str, &str)]) -> Self {
        let mut sorted: Vec<_> = phrases
            .iter()
            .filter(|(phrase, label)| char_len(label) < char_len(phrase))
            .collect();
        sorted.sort_by(|a, b| char_len(b.0).cmp(&char_len(a.0)).then_with(|| a.0.cmp(b.0)));
        let pairs = sorted
            .into_iter()
            .filter_map(|(phrase, label)| {
                let body = phrase.split_whitespace().map(regex::escape).collect::<Vec<_>>().join(r"\s+");
                Regex::new(&format!(r"(?i)\b{body}\b")).ok().map(|re| (re, label.to_string()))
            })
            .collect();
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (re, label) in &self.pairs {
            result = re.replace_all(&result, regex::NoExpand(label)).into_owned();
        }
        result
    }
}

impl Default for PhraseTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}
