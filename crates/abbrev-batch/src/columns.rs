use abbrev_core::{AbbreviationResult, VerificationReport};

pub const ABBREVIATION: &str = "Abbreviation";
pub const ORIGINAL_LENGTH: &str = "Original Length";
pub const FINAL_LENGTH: &str = "Final Length";
pub const LENGTH_REDUCTION: &str = "Length Reduction";
pub const APPLIED_RULES: &str = "Applied Rules";
pub const AI_CONFIDENCE: &str = "AI Confidence";
pub const IS_STANDARD: &str = "Is Standard";
pub const SUGGESTIONS: &str = "Suggestions";
pub const METHOD_USED: &str = "Method Used";

/// Columns appended to every output row, in order.
pub const OUTPUT_COLUMNS: [&str; 9] = [
    ABBREVIATION,
    ORIGINAL_LENGTH,
    FINAL_LENGTH,
    LENGTH_REDUCTION,
    APPLIED_RULES,
    AI_CONFIDENCE,
    IS_STANDARD,
    SUGGESTIONS,
    METHOD_USED,
];

/// Index of `name` in `headers`, ignoring case and surrounding whitespace.
pub fn find_column(headers: &[String], name: &str) -> Option<usize> {
    let name = name.trim();
    headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
}

/// Output header row plus where each result column lives in it. Result
/// columns already present in the input are reused, not duplicated.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub headers: Vec<String>,
    slots: [usize; 9],
}

impl OutputLayout {
    pub fn new(mut headers: Vec<String>) -> Self {
        let mut slots = [0; 9];
        for (slot, name) in slots.iter_mut().zip(OUTPUT_COLUMNS) {
            *slot = match headers.iter().position(|h| h == name) {
                Some(i) => i,
                None => {
                    headers.push(name.to_string());
                    headers.len() - 1
                }
            };
        }
        Self { headers, slots }
    }

    /// Pad `row` to the header width.
    pub fn pad(&self, mut row: Vec<String>) -> Vec<String> {
        if row.len() < self.headers.len() {
            row.resize(self.headers.len(), String::new());
        }
        row
    }

    /// Write a result and its report into `row`.
    pub fn fill(&self, row: Vec<String>, result: &AbbreviationResult, report: &VerificationReport) -> Vec<String> {
        let mut row = self.pad(row);
        let values = [
            result.abbreviated.clone(),
            result.original_length.to_string(),
            result.final_length().to_string(),
            format!("{:.1}%", result.reduction_pct()),
            result.applied_rules.join(", "),
            format!("{:.2}", report.confidence),
            if report.is_standard { "Yes" } else { "No" }.to_string(),
            report.suggestions.join(", "),
            result.method_used.to_string(),
        ];
        for (slot, value) in self.slots.iter().zip(values) {
            row[*slot] = value;
        }
        row
    }
}
