//! Verse-Harvest: a lyrics catalog harvester
//!
//! This crate implements a concurrent crawl-and-ingest pipeline that discovers
//! all artists in an alphabetically partitioned catalog index, fetches each
//! artist's works from an external lyrics provider, and persists them as JSON
//! objects in durable storage, skipping artists that are already stored.

pub mod catalog;
pub mod config;
pub mod ingest;
pub mod logsink;
pub mod model;
pub mod pool;
pub mod snapshot;
pub mod storage;

use thiserror::Error;

/// Main error type for Verse-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] catalog::FetchError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Snapshot error for {path}: {message}")]
    Snapshot { path: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Worker pool error: {0}")]
    Pool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Verse-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use logsink::{LogAggregator, LogLevel, LogRecord, LogSender};
pub use model::{Artist, StorageKey, Work};
