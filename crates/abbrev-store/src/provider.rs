use abbrev_core::{AbbrevError, Result};
use abbrev_engine::Dictionary;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where dictionary entries live between runs.
pub trait DictionaryProvider: Send + Sync {
    fn load(&self) -> Result<HashMap<String, String>>;
    fn save(&self, entries: &HashMap<String, String>) -> Result<()>;
}

/// In-memory provider.
pub struct MemoryProvider {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self { data: RwLock::new(HashMap::new()) }
    }

    pub fn with_entries(entries: HashMap<String, String>) -> Self {
        Self { data: RwLock::new(entries) }
    }

    /// Seeded with the built-in vocabulary.
    pub fn builtin() -> Self {
        Self::with_entries(Dictionary::builtin().to_map())
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryProvider for MemoryProvider {
    fn load(&self) -> Result<HashMap<String, String>> {
        Ok(self.data.read().clone())
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<()> {
        *self.data.write() = entries.clone();
        Ok(())
    }
}

/// JSON object file `{ "word": "abbreviation", ... }` with atomic writes.
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DictionaryProvider for JsonFileProvider {
    /// A missing file is created with the built-in vocabulary.
    fn load(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            let defaults = Dictionary::builtin().to_map();
            tracing::info!(path = %self.path.display(), entries = defaults.len(), "dictionary file missing, writing defaults");
            self.save(&defaults)?;
            return Ok(defaults);
        }
        let raw = fs::read(&self.path)?;
        let entries: HashMap<String, String> = serde_json::from_slice(&raw)
            .map_err(|e| AbbrevError::Dictionary(format!("invalid dictionary file {}: {e}", self.path.display())))?;
        tracing::info!(path = %self.path.display(), entries = entries.len(), "loaded dictionary");
        Ok(entries)
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<()> {
        let sorted: BTreeMap<&String, &String> = entries.iter().collect();
        let body = serde_json::to_vec_pretty(&sorted)?;
        write_atomic(&self.path, &body)?;
        tracing::info!(path = %self.path.display(), entries = entries.len(), "saved dictionary");
        Ok(())
    }
}

/// Write to a sibling temp file, then rename over the target.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp_path = path.with_extension("tmp");
    let result = (|| -> std::io::Result<()> {
        let mut f = fs::File::create(&tmp_path)?;
        f.write_all(bytes)?;
        f.flush()?;
        f.sync_all()?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    })();
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(AbbrevError::Dictionary(format!("failed to write {}: {e}", path.display())));
    }
    Ok(())
}
