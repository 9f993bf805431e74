//! Dictionary persistence and the shared, hot-swappable dictionary.

pub mod provider;
pub mod store;

pub use provider::{DictionaryProvider, JsonFileProvider, MemoryProvider};
pub use store::{DictionaryStore, UpdateStats};
