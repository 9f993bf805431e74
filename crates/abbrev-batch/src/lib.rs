//! Batch driver: CSV in, CSV out, one abbreviation per "Part Definition" row.

pub mod columns;
pub mod processor;

pub use columns::OUTPUT_COLUMNS;
pub use processor::{BatchOptions, BatchOutput, BatchProcessor, BatchStats, BatchTable};
