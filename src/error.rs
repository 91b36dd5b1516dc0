// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid repository identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Repository access failed: {0}")]
    RepositoryAccess(String),

    #[error("Archive fetch failed: {0}")]
    Fetch(String),

    #[error("Invalid ignore pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
