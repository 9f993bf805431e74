use abbrev_core::Result;
use abbrev_engine::text::fold_key;
use abbrev_engine::{Dictionary, DictionarySource};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::provider::DictionaryProvider;

/// Outcome of an [`DictionaryStore::upsert`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpdateStats {
    pub added: usize,
    pub updated: usize,
    pub invalid: usize,
    /// Dictionary size after the update.
    pub total: usize,
}

/// The live dictionary. Readers take a cheap `Arc` snapshot; writers build a
/// replacement off-lock, persist it, then swap it in.
pub struct DictionaryStore {
    current: RwLock<Arc<Dictionary>>,
    provider: Box<dyn DictionaryProvider>,
    writer: Mutex<()>,
}

impl DictionaryStore {
    /// Load the initial dictionary from `provider`.
    pub fn open(provider: impl DictionaryProvider + 'static) -> Result<Self> {
        let dictionary = build(provider.load()?)?;
        Ok(Self {
            current: RwLock::new(Arc::new(dictionary)),
            provider: Box::new(provider),
            writer: Mutex::new(()),
        })
    }

    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }

    /// Merge `entries` into the dictionary and persist the result.
    ///
    /// Entries with an empty key or abbreviation are counted as invalid and
    /// skipped. A key already present (under case-fold) counts as updated.
    pub fn upsert<I, K, V>(&self, entries: I) -> Result<UpdateStats>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let _guard = self.writer.lock();
        let base = self.snapshot();
        let mut stats = UpdateStats::default();
        let mut seen: HashSet<String> = HashSet::new();
        let mut accepted = Vec::new();

        for (key, value) in entries {
            let (key, value) = (key.as_ref().trim(), value.as_ref().trim());
            if key.is_empty() || value.is_empty() {
                stats.invalid += 1;
                continue;
            }
            let folded = fold_key(key);
            if base.contains(key) || seen.contains(&folded) {
                stats.updated += 1;
            } else {
                stats.added += 1;
            }
            seen.insert(folded);
            accepted.push((key.to_string(), value.to_string()));
        }

        if accepted.is_empty() {
            stats.total = base.len();
            return Ok(stats);
        }

        let next = base.with_entries(accepted)?;
        self.provider.save(&next.to_map())?;
        stats.total = next.len();
        *self.current.write() = Arc::new(next);
        tracing::info!(added = stats.added, updated = stats.updated, invalid = stats.invalid, total = stats.total, "dictionary updated");
        Ok(stats)
    }

    /// Replace the live dictionary with what the provider holds now.
    pub fn reload(&self) -> Result<usize> {
        let _guard = self.writer.lock();
        let dictionary = build(self.provider.load()?)?;
        let len = dictionary.len();
        *self.current.write() = Arc::new(dictionary);
        Ok(len)
    }

    /// Persist the live dictionary.
    pub fn save(&self) -> Result<()> {
        let _guard = self.writer.lock();
        self.provider.save(&self.snapshot().to_map())
    }
}

impl DictionarySource for DictionaryStore {
    fn snapshot(&self) -> Arc<Dictionary> {
        Arc::clone(&self.current.read())
    }
}

/// Sorted so that keys colliding under case-fold resolve the same way every load.
fn build(entries: impl IntoIterator<Item = (String, String)>) -> Result<Dictionary> {
    let sorted: BTreeMap<String, String> = entries.into_iter().collect();
    Dictionary::new(sorted)
}
