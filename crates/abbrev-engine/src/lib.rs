//! Part-description abbreviation engine.
//!
//! Stages, in the order the [`Abbreviator`] runs them:
//! 1. Specialized patterns: condensed renderings for known layouts (linesets)
//! 2. Model strategy: optional pluggable predictor
//! 3. Rule engine: dictionary, phrases, parentheticals, long words, segments
//! 4. Final truncation: measurement-aware cut
//!
//! [`verify`] scores the result afterwards.

pub mod dictionary;
pub mod measure;
pub mod model;
pub mod pattern;
pub mod phrases;
pub mod pipeline;
pub mod rules;
pub mod text;
pub mod truncate;
pub mod verify;

pub use dictionary::{Dictionary, DictionarySource};
pub use model::{ModelStrategy, WordPatternModel};
pub use pattern::{PatternDetector, PatternMatch};
pub use pipeline::{Abbreviator, ModelStatus};
pub use rules::{Reducer, Reduction, RuleEngine};
pub use truncate::{truncate, Truncation, TruncationKind};
pub use verify::{verify, verify_with_target};

#[cfg(test)]
mod tests;
