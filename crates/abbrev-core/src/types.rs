use serde::{Deserialize, Serialize};

use crate::error::{AbbrevError, Result};

/// Which strategy produced an abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Empty input; nothing to do.
    None,
    NoChange,
    SpecializedPattern,
    MlModel,
    RuleBased,
    Error,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::NoChange => "no_change",
            Self::SpecializedPattern => "specialized_pattern",
            Self::MlModel => "ml_model",
            Self::RuleBased => "rule_based",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single abbreviation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbbreviationRequest {
    pub text: String,
    pub target_length: usize,
    #[serde(default = "default_use_model")]
    pub use_model: bool,
}

fn default_use_model() -> bool {
    true
}

impl AbbreviationRequest {
    pub fn new(text: impl Into<String>, target_length: usize) -> Self {
        Self { text: text.into(), target_length, use_model: true }
    }

    pub fn with_model(mut self, use_model: bool) -> Self {
        self.use_model = use_model;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_length == 0 {
            return Err(AbbrevError::validation("target_length must be a positive integer"));
        }
        Ok(())
    }
}

/// Outcome of one abbreviation call.
///
/// `final_length` is not stored: it is always derived from `abbreviated`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbbreviationResult {
    pub abbreviated: String,
    pub original_length: usize,
    pub applied_rules: Vec<String>,
    pub method_used: Method,
}

impl AbbreviationResult {
    pub fn new(abbreviated: String, original_length: usize, applied_rules: Vec<String>, method_used: Method) -> Self {
        Self { abbreviated, original_length, applied_rules, method_used }
    }

    /// Length of the abbreviated text, in characters.
    pub fn final_length(&self) -> usize {
        self.abbreviated.chars().count()
    }

    pub fn reduction_pct(&self) -> f64 {
        if self.original_length == 0 {
            return 0.0;
        }
        (self.original_length as f64 - self.final_length() as f64) / self.original_length as f64 * 100.0
    }

    pub fn target_met(&self, target_length: usize) -> bool {
        self.final_length() <= target_length
    }
}

/// Quality report for an abbreviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub confidence: f64,
    pub readability: f64,
    pub meaning_preserved: bool,
    pub is_standard: bool,
    pub suggestions: Vec<String>,
}
