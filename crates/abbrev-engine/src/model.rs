//! Model strategy seam and a learned word-pattern model.

use abbrev_core::AbbrevError;
use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use crate::measure::is_protected_word;
use crate::text::{apply_case, char_len, take_chars};

/// A pluggable predictor. Any error makes the caller fall back to the rule
/// engine.
pub trait ModelStrategy: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the model finished initializing and can serve predictions.
    fn is_ready(&self) -> bool {
        true
    }

    fn predict(&self, text: &str, target_length: usize) -> anyhow::Result<String>;
}

/// Shortest prefix the model will cut a word to.
const MIN_WORD_LEN: usize = 3;

/// Learns word abbreviations and an average length ratio from
/// `(original, abbreviated)` training pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordPatternModel {
    /// Folded word → abbreviation.
    words: BTreeMap<String, String>,
    ratio: f64,
    trained: bool,
}

impl WordPatternModel {
    /// Fit from training pairs. Word patterns come from pairs with equal word
    /// counts; the most frequent abbreviation per word wins, ties broken
    /// lexically.
    pub fn fit<S: AsRef<str>>(pairs: &[(S, S)]) -> Self {
        let mut counts: HashMap<String, HashMap<String, usize>> = HashMap::new();
        let mut ratio_sum = 0.0;
        let mut ratio_n = 0usize;

        for (original, abbreviated) in pairs {
            let (original, abbreviated) = (original.as_ref(), abbreviated.as_ref());
            let orig_len = char_len(original);
            if orig_len == 0 {
                continue;
            }
            ratio_sum += char_len(abbreviated) as f64 / orig_len as f64;
            ratio_n += 1;

            let ow: Vec<&str> = original.split_whitespace().collect();
            let aw: Vec<&str> = abbreviated.split_whitespace().collect();
            if ow.len() != aw.len() {
                continue;
            }
            for (o, a) in ow.iter().zip(aw.iter()) {
                if o != a && char_len(o) > char_len(a) {
                    *counts.entry(o.to_lowercase()).or_default().entry(a.to_string()).or_insert(0) += 1;
                }
            }
        }

        let words = counts
            .into_iter()
            .filter_map(|(word, abbrevs)| {
                abbrevs
                    .into_iter()
                    .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
                    .map(|(abbr, _)| (word, abbr))
            })
            .collect::<BTreeMap<_, _>>();

        let ratio = if ratio_n > 0 { (ratio_sum / ratio_n as f64).clamp(0.1, 1.0) } else { 1.0 };
        tracing::info!(examples = ratio_n, vocabulary = words.len(), ratio, "word pattern model trained");
        Self { words, ratio, trained: ratio_n > 0 }
    }

    pub fn is_trained(&self) -> bool {
        self.trained
    }

    pub fn vocabulary_len(&self) -> usize {
        self.words.len()
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn save(&self, path: impl AsRef<Path>) -> abbrev_core::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_vec_pretty(self)?)?;
        tracing::info!(path = %path.display(), "saved word pattern model");
        Ok(())
    }

    /// Load a saved model. A file holding an untrained model is rejected.
    pub fn load(path: impl AsRef<Path>) -> abbrev_core::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read(path)?;
        let model: Self = serde_json::from_slice(&raw)?;
        if !model.trained {
            return Err(AbbrevError::Model(format!("{} holds an untrained model", path.display())));
        }
        Ok(model)
    }
}

impl ModelStrategy for WordPatternModel {
    fn name(&self) -> &str {
        "word_pattern"
    }

    fn is_ready(&self) -> bool {
        self.trained
    }

    fn predict(&self, text: &str, target_length: usize) -> anyhow::Result<String> {
        if !self.trained {
            bail!("word pattern model is not trained");
        }
        if char_len(text) <= target_length {
            return Ok(text.to_string());
        }

        let learned: HashSet<&str> = self.words.values().map(String::as_str).collect();
        let mut words: Vec<String> = text
            .split_whitespace()
            .map(|w| match self.words.get(&w.to_lowercase()) {
                Some(abbr) => apply_case(w, abbr),
                None => w.to_string(),
            })
            .collect();

        let total = |ws: &[String]| ws.iter().map(|w| char_len(w)).sum::<usize>() + ws.len().saturating_sub(1);

        let mut order: Vec<usize> = (0..words.len()).collect();
        order.sort_by(|&a, &b| char_len(&words[b]).cmp(&char_len(&words[a])).then(a.cmp(&b)));
        for idx in order {
            if total(&words) <= target_length {
                break;
            }
            let word = &words[idx];
            let len = char_len(word);
            if len <= MIN_WORD_LEN || learned.contains(word.as_str()) || is_protected_word(word) {
                continue;
            }
            let keep = MIN_WORD_LEN.max((len as f64 * self.ratio) as usize);
            if keep < len {
                words[idx] = take_chars(word, keep).to_string();
            }
        }
        Ok(words.join(" "))
    }
}
