//! Paexkey: a depth-bounded URL harvester
//!
//! This crate crawls outward from a seed URL, breadth first, and collects every
//! linked or embedded resource URL it can find on the pages it fetches. Discovered
//! URLs are appended to a per-domain text file and can be filtered by keyword
//! once the crawl finishes.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Paexkey operations
///
/// Per-URL fetch problems are not errors; they are reported as
/// [`crawler::SkipReason`] values and never abort a crawl. Everything here is
/// fatal to the run.
#[derive(Debug, Error)]
pub enum PaexError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::EntryState,
        to: state::EntryState,
    },

    #[error("Worker task failed: {0}")]
    Worker(String),

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

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Paexkey operations
pub type Result<T> = std::result::Result<T, PaexError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{CrawlConfig, OutputConfig, Settings};
pub use crawler::{crawl, CrawlEngine, Extractor, FetchResult, SkipReason};
pub use output::{CrawlStatistics, FileSink, MemorySink, OutputSink};
pub use state::{EntryState, FrontierEntry, VisitedSet};
pub use crate::url::{output_domain, parse_seed, resolve};
