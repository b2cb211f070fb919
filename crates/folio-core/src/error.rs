#![forbid(unsafe_code)]

use thiserror::Error;

/// Configuration parse/validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse page config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("page config validation failed: {0}")]
    Invalid(String),
}

/// Top-level error for page wiring and host interaction.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("required page element missing: {0}")]
    MissingElement(String),
    #[error("asset fetch failed: {0}")]
    Fetch(String),
    #[error("host call failed: {0}")]
    Host(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;
