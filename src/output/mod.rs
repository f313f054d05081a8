//! Output module for persisting crawl results
//!
//! This module handles:
//! - Appending discovered URLs to the per-domain output file
//! - Keyword filtering of the finished file
//! - Recording and printing crawl statistics

mod file_sink;
pub mod filter;
pub mod stats;
mod traits;

pub use file_sink::FileSink;
pub use filter::{apply_keyword_filter, filter_file, load_keywords};
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{MemorySink, OutputError, OutputResult, OutputSink};
