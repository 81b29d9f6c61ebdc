//! Pagesight: a website accessibility audit engine
//!
//! This crate renders pages into read-only DOM snapshots, runs a fixed
//! battery of WCAG-derived checks against them, and produces a normalized
//! compliance score. It supports a single-page audit and a bounded
//! same-origin crawl that aggregates per-page findings into a site report.

pub mod aggregate;
pub mod checks;
pub mod config;
pub mod crawler;
pub mod fallback;
pub mod render;
pub mod report;
pub mod scanner;

use thiserror::Error;

/// Main error type for Pagesight operations
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Navigation deadline exceeded for {url}")]
    RenderTimeout { url: String },

    #[error("Failed to render {url}: {message}")]
    RenderFailure { url: String, message: String },

    #[error("Check '{check}' could not complete: {source}")]
    CheckExecution {
        check: &'static str,
        source: CheckError,
    },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
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
}

/// Errors raised by an individual check against a snapshot.
///
/// A failing check is treated as inconclusive for that page; it never
/// aborts the remaining checks in the registry.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Snapshot evaluation failed: {0}")]
    Evaluation(String),
}

/// Result type alias for Pagesight operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use fallback::scan_website;
pub use render::Snapshot;
pub use report::{Impact, PageResult, Principle, ScanResult, Violation};
