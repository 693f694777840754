//! Jobhound: a careers-site job listing crawler and search index
//!
//! This crate implements the ingestion pipeline for a single employer's
//! careers site: it discovers job posting URLs from paginated search results,
//! fetches and parses each posting into a structured listing, tags it with
//! technology keywords, and upserts it into a SQLite store with a full-text
//! search index keyed by requisition ID.

pub mod config;
pub mod crawler;
pub mod keywords;
pub mod listing;
pub mod seed;
pub mod storage;

use thiserror::Error;

/// Main error type for Jobhound operations
#[derive(Debug, Error)]
pub enum JobhoundError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("Seed file error: {0}")]
    Json(#[from] serde_json::Error),

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

/// Result type alias for Jobhound operations
pub type Result<T> = std::result::Result<T, JobhoundError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use keywords::extract_keywords;
pub use listing::JobListing;
pub use storage::{SqliteStorage, Storage};
