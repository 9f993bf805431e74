use thiserror::Error;

#[derive(Error, Debug)]
pub enum AbbrevError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Processing error: {0}")]
    Processing(String),
    #[error("Dictionary error: {0}")]
    Dictionary(String),
    #[error("Model error: {0}")]
    Model(String),
    #[error("CSV error: {0}")]
    Csv(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AbbrevError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing(msg.into())
    }

    /// Errors the caller caused, as opposed to failures inside the service.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, AbbrevError>;
