//! Output sink trait and error types
//!
//! The engine reports every batch of newly discovered URLs to an
//! [`OutputSink`]. Sinks are written to only from the engine loop, but take
//! `&self` so they can be shared with whoever inspects the results.

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Errors that can occur during output operations
///
/// All of these are fatal to a crawl: results that cannot be persisted are
/// not worth collecting.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create output directory {path}: {source}")]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for discovered URLs
pub trait OutputSink {
    /// Records a batch of newly discovered URLs, in discovery order
    ///
    /// Called once per completed fetch unit, possibly with an empty batch.
    fn record_discovered(&self, urls: &[String]) -> OutputResult<()>;

    /// Finalizes the output, performing any cleanup or final writes
    fn finalize(&self) -> OutputResult<()> {
        Ok(())
    }
}

/// Sink that keeps every discovered URL in memory
///
/// Useful for library callers that want the URLs rather than a file, and for
/// tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    urls: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every URL recorded so far, in order
    pub fn urls(&self) -> Vec<String> {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl OutputSink for MemorySink {
    fn record_discovered(&self, urls: &[String]) -> OutputResult<()> {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(urls);
        Ok(())
    }
}
