use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AbbrevConfig {
    pub application: ApplicationConfig,
    pub abbreviation: AbbreviationConfig,
    pub dictionary: DictionaryConfig,
    pub batch: BatchConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AbbreviationConfig {
    pub target_length: usize,
    pub use_model: bool,
    /// Trained word-pattern model; rules only when unset or unreadable.
    pub model_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Header holding the text to abbreviate; matched case-insensitively.
    pub column: String,
    pub row_timeout_ms: u64,
    pub deadline_ms: u64,
    pub max_concurrency: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self { name: "Part Abbreviation Service".into(), log_level: "info".into() }
    }
}

impl Default for AbbreviationConfig {
    fn default() -> Self {
        Self { target_length: 30, use_model: true, model_path: None }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("data/abbreviations.json") }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            column: "Part Definition".into(),
            row_timeout_ms: 2_000,
            deadline_ms: 300_000,
            max_concurrency: 8,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: 8080 }
    }
}

impl BatchConfig {
    pub fn row_timeout(&self) -> Duration {
        Duration::from_millis(self.row_timeout_ms)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }
}

impl AbbrevConfig {
    /// Parse a JSON config document. Missing sections and keys take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file, falling back to defaults if it does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json(&raw)?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
