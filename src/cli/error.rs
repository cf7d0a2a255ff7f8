use std::path::PathBuf;

use thiserror::Error;

use llm_pricing::{ConfigError, PricingError};

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{input}: {source}")]
    Price {
        input: String,
        source: PricingError,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("No files match {pattern}")]
    NoMatch { pattern: String },

    #[error("No responses found in {}", .path.display())]
    Empty { path: PathBuf },
}
