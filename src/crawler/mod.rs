//! Crawler module for page fetching and URL harvesting
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and response classification
//! - Multi-strategy URL extraction
//! - The frontier and bounded worker pool
//! - Overall crawl coordination

mod classifier;
mod coordinator;
pub mod extractor;
mod fetcher;
mod scheduler;

pub use classifier::is_textual;
pub use coordinator::CrawlEngine;
pub use extractor::{ExtractionStrategy, Extractor, Page};
pub use fetcher::{build_http_client, FetchResult, Fetcher, SkipReason};
pub use scheduler::{Frontier, WorkerPool};

use crate::config::Settings;
use crate::output::{apply_keyword_filter, CrawlStatistics, FileSink, OutputSink};
use crate::url::output_domain;
use crate::{PaexError, UrlError};

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Create `<output>/<domain>/` and open `<domain>.txt` for appending
/// 2. Crawl breadth first from the seed, writing discovered URLs as they appear
/// 3. Flush the output file
/// 4. Apply the keyword filter, if one was configured
///
/// # Arguments
///
/// * `settings` - Resolved and validated settings
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - Crawl completed
/// * `Err(PaexError)` - The output could not be written or a worker died
pub async fn crawl(settings: Settings) -> Result<CrawlStatistics, PaexError> {
    let Settings { crawler, output } = settings;

    let domain = output_domain(&crawler.seed_url).ok_or(UrlError::MissingDomain)?;
    let sink = FileSink::create(&output.directory, &domain)?;
    tracing::info!("Saving URLs to {}", sink.path().display());

    let mut engine = CrawlEngine::new(crawler, sink)?;
    let stats = engine.run().await?;

    let sink = engine.into_sink();
    sink.finalize()?;

    if let Some(kept) = apply_keyword_filter(&sink, &output)? {
        tracing::info!("{} URLs matched the keyword list", kept);
    }

    Ok(stats)
}
