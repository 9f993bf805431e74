//! Application state shared across all handlers.

use abbrev_batch::{BatchProcessor, BatchStats};
use abbrev_core::{AbbrevConfig, AbbreviationResult, Result};
use abbrev_engine::{Abbreviator, ModelStrategy, WordPatternModel};
use abbrev_store::{DictionaryStore, JsonFileProvider, MemoryProvider};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Cumulative usage counters since startup.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UsageSnapshot {
    pub texts_processed: u64,
    pub target_met: u64,
    pub methods: BTreeMap<String, u64>,
    pub files_processed: u64,
    pub rows_processed: u64,
}

#[derive(Debug, Clone, Default)]
pub struct UsageStats {
    inner: Arc<Mutex<UsageSnapshot>>,
}

impl UsageStats {
    pub fn record(&self, result: &AbbreviationResult, target_length: usize) {
        let mut s = self.inner.lock();
        s.texts_processed += 1;
        if result.target_met(target_length) {
            s.target_met += 1;
        }
        *s.methods.entry(result.method_used.to_string()).or_insert(0) += 1;
    }

    pub fn record_batch(&self, stats: &BatchStats) {
        let mut s = self.inner.lock();
        s.files_processed += 1;
        s.rows_processed += stats.processed as u64;
    }

    pub fn snapshot(&self) -> UsageSnapshot {
        self.inner.lock().clone()
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AbbrevConfig>,
    pub dictionary: Arc<DictionaryStore>,
    pub abbreviator: Arc<Abbreviator>,
    pub batch: Arc<BatchProcessor>,
    pub usage: UsageStats,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(config: AbbrevConfig, dictionary: DictionaryStore, model: Option<Arc<dyn ModelStrategy>>) -> Self {
        let dictionary = Arc::new(dictionary);
        let mut abbreviator = Abbreviator::new(dictionary.clone());
        if let Some(model) = model {
            abbreviator = abbreviator.with_model(model);
        }
        let abbreviator = Arc::new(abbreviator);
        Self {
            config: Arc::new(config),
            dictionary,
            batch: Arc::new(BatchProcessor::new(abbreviator.clone())),
            abbreviator,
            usage: UsageStats::default(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Built-in dictionary held in memory; nothing touches disk.
    pub fn in_memory(config: AbbrevConfig) -> Result<Self> {
        let dictionary = DictionaryStore::open(MemoryProvider::builtin())?;
        Ok(Self::new(config, dictionary, None))
    }

    /// Dictionary file and optional model from `config`. A model that fails
    /// to load is logged and left out.
    pub fn from_config(config: AbbrevConfig) -> Result<Self> {
        let dictionary = DictionaryStore::open(JsonFileProvider::new(&config.dictionary.path))?;
        let model = config.abbreviation.model_path.as_ref().and_then(|path| match WordPatternModel::load(path) {
            Ok(model) => Some(Arc::new(model) as Arc<dyn ModelStrategy>),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not load model, using rules only");
                None
            }
        });
        Ok(Self::new(config, dictionary, model))
    }
}
