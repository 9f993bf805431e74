//! The entry point that sequences all stages.

use abbrev_core::{AbbreviationRequest, AbbreviationResult, Method, Result};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::dictionary::{Dictionary, DictionarySource};
use crate::model::ModelStrategy;
use crate::pattern::PatternDetector;
use crate::rules::{Reducer, RuleEngine, SMART_TRUNCATION_TAG};
use crate::text::char_len;
use crate::truncate::truncate;

/// Model availability, decided once when the service is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelStatus {
    pub available: bool,
    pub name: Option<String>,
}

/// Abbreviation service. Build once, share across threads.
pub struct Abbreviator {
    dictionary: Arc<dyn DictionarySource>,
    patterns: PatternDetector,
    reducer: Arc<dyn Reducer>,
    model: Option<Arc<dyn ModelStrategy>>,
    model_status: ModelStatus,
}

impl Abbreviator {
    pub fn new(dictionary: Arc<dyn DictionarySource>) -> Self {
        Self {
            dictionary,
            patterns: PatternDetector::default(),
            reducer: Arc::new(RuleEngine::default()),
            model: None,
            model_status: ModelStatus::default(),
        }
    }

    /// Service over the built-in dictionary.
    pub fn builtin() -> Self {
        Self::new(Arc::new(Dictionary::builtin()))
    }

    pub fn with_model(mut self, model: Arc<dyn ModelStrategy>) -> Self {
        let available = model.is_ready();
        if available {
            tracing::info!(model = model.name(), "model strategy available");
        } else {
            tracing::warn!(model = model.name(), "model strategy not ready, using rules only");
        }
        self.model_status = ModelStatus { available, name: Some(model.name().to_string()) };
        self.model = Some(model);
        self
    }

    pub fn with_reducer(mut self, reducer: Arc<dyn Reducer>) -> Self {
        self.reducer = reducer;
        self
    }

    pub fn with_patterns(mut self, patterns: PatternDetector) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn model_status(&self) -> &ModelStatus {
        &self.model_status
    }

    pub fn dictionary(&self) -> Arc<Dictionary> {
        self.dictionary.snapshot()
    }

    /// Validate a request, then abbreviate it.
    pub fn process(&self, request: &AbbreviationRequest) -> Result<AbbreviationResult> {
        request.validate()?;
        Ok(self.abbreviate(&request.text, request.target_length, request.use_model))
    }

    /// Abbreviate `text` to at most `target_length` chars where possible.
    /// Never fails: internal errors yield the original text with
    /// [`Method::Error`].
    pub fn abbreviate(&self, text: &str, target_length: usize, use_model: bool) -> AbbreviationResult {
        let original_length = char_len(text);
        if text.trim().is_empty() {
            return AbbreviationResult::new(text.to_string(), original_length, vec![], Method::None);
        }
        if original_length <= target_length {
            return AbbreviationResult::new(text.to_string(), original_length, vec![], Method::NoChange);
        }

        let start = Instant::now();

        if let Some(found) = self.patterns.detect(text) {
            tracing::debug!(
                pattern = found.pattern,
                from = original_length,
                to = char_len(&found.text),
                elapsed_us = start.elapsed().as_micros() as u64,
                "specialized pattern abbreviation"
            );
            return AbbreviationResult::new(found.text, original_length, found.applied_rules, Method::SpecializedPattern);
        }

        if use_model && self.model_status.available {
            if let Some(result) = self.try_model(text, target_length, original_length) {
                tracing::debug!(
                    from = original_length,
                    to = result.final_length(),
                    elapsed_us = start.elapsed().as_micros() as u64,
                    "model abbreviation"
                );
                return result;
            }
        }

        let dictionary = self.dictionary.snapshot();
        match self.reducer.reduce(&dictionary, text, target_length) {
            Ok(reduction) => {
                tracing::debug!(
                    from = original_length,
                    to = char_len(&reduction.text),
                    elapsed_us = start.elapsed().as_micros() as u64,
                    "rule-based abbreviation"
                );
                AbbreviationResult::new(reduction.text, original_length, reduction.applied_rules, Method::RuleBased)
            }
            Err(e) => {
                tracing::error!(error = %e, "rule-based abbreviation failed");
                AbbreviationResult::new(text.to_string(), original_length, vec![format!("Error: {e}")], Method::Error)
            }
        }
    }

    fn try_model(&self, text: &str, target_length: usize, original_length: usize) -> Option<AbbreviationResult> {
        let model = self.model.as_ref()?;
        let predicted = match model.predict(text, target_length) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(model = model.name(), error = %e, "model prediction failed, falling back to rules");
                return None;
            }
        };

        let mut abbreviated = predicted.replace("...", "").trim().to_string();
        if abbreviated.is_empty() {
            tracing::warn!(model = model.name(), "model returned empty text, falling back to rules");
            return None;
        }
        let mut rules = vec![format!("ML model applied ({})", model.name())];
        if char_len(&abbreviated) > target_length {
            abbreviated = truncate(&abbreviated, target_length);
            rules.push(SMART_TRUNCATION_TAG.to_string());
        }
        Some(AbbreviationResult::new(abbreviated, original_length, rules, Method::MlModel))
    }
}

impl Default for Abbreviator {
    fn default() -> Self {
        Self::builtin()
    }
}
