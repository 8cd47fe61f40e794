//! Error type shared by catalog construction, protocol parsing and config loading.
//!
//! The scorers themselves are infallible; only the edges of the pipeline
//! (validated input, configuration, output encoding) can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecError {
    /// Two catalog entries share an id.
    #[error("duplicate item id in catalog: {0}")]
    DuplicateItemId(String),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("missing section header: {0}")]
    MissingSection(&'static str),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RecError>;
