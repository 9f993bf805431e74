pub mod config;
pub mod error;
pub mod types;

pub use config::AbbrevConfig;
pub use error::{AbbrevError, Result};
pub use types::{AbbreviationRequest, AbbreviationResult, Method, VerificationReport};
