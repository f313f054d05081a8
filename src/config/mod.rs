//! Configuration module for Paexkey
//!
//! Settings come from three layers: command-line flags, an optional TOML file,
//! and built-in defaults. This module parses the file, merges the layers and
//! validates the result.
//!
//! # Example
//!
//! ```no_run
//! use paexkey::config::{resolve_settings, Overrides};
//!
//! let overrides = Overrides {
//!     seed_url: "https://example.com/".to_string(),
//!     ..Default::default()
//! };
//! let settings = resolve_settings(overrides, None).unwrap();
//! println!("Crawler will use max depth: {}", settings.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CrawlConfig, CrawlerSection, FileConfig, OutputConfig, OutputSection, Overrides, Settings,
    DEFAULT_MAX_DEPTH, DEFAULT_OUTPUT_DIR, DEFAULT_THREADS, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_file_config, load_file_config_with_hash, resolve_settings,
};
pub use validation::MAX_THREADS;
