//! Crawl engine - breadth-first crawl orchestration
//!
//! The engine owns the frontier and drives the crawl level by level:
//! - Pop every queued entry of the current depth
//! - Discard entries that are too deep, already visited or repeated in the batch
//! - Run the remaining fetch+extract units on the worker pool
//! - Consume results in submission order, writing new URLs to the sink and
//!   enqueuing them one level deeper

use crate::config::CrawlConfig;
use crate::crawler::extractor::Extractor;
use crate::crawler::fetcher::{FetchResult, Fetcher, SkipReason};
use crate::crawler::scheduler::{Frontier, WorkerPool};
use crate::output::{CrawlStatistics, OutputSink};
use crate::state::{EntryState, FrontierEntry, VisitedSet};
use crate::PaexError;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// What a single fetch+extract unit produced
#[derive(Debug)]
enum UnitOutcome {
    /// Page was fetched and scanned
    Extracted { candidates: Vec<String> },

    /// Page yielded nothing to scan
    Skipped { reason: SkipReason, detail: String },

    /// Another unit marked the URL first
    AlreadyVisited,
}

/// Fetches one URL and, if it is textual, extracts candidate URLs from it
///
/// Runs on the worker pool. The visited set is updated here, immediately
/// after the fetch, according to the skip reason.
async fn process_unit(
    url: String,
    fetcher: Fetcher,
    extractor: Arc<Extractor>,
    visited: VisitedSet,
) -> UnitOutcome {
    let parsed = match Url::parse(&url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!("Cannot fetch {}: {}", url, e);
            return UnitOutcome::Skipped {
                reason: SkipReason::NetworkError,
                detail: e.to_string(),
            };
        }
    };

    match fetcher.fetch(&parsed).await {
        FetchResult::Fetched { body, .. } => {
            if !visited.check_and_mark(&url) {
                return UnitOutcome::AlreadyVisited;
            }
            let candidates = extractor.extract(&parsed, &body);
            UnitOutcome::Extracted { candidates }
        }
        FetchResult::Skipped { reason, detail } => {
            if reason.marks_visited() {
                visited.check_and_mark(&url);
            }
            UnitOutcome::Skipped { reason, detail }
        }
    }
}

/// Breadth-first, depth-bounded crawler
///
/// Generic over the sink so library callers and tests can collect URLs in
/// memory while the binary appends them to a file.
pub struct CrawlEngine<S: OutputSink> {
    config: CrawlConfig,
    fetcher: Fetcher,
    extractor: Arc<Extractor>,
    visited: VisitedSet,
    frontier: Frontier,
    pool: WorkerPool,
    sink: S,
    stats: CrawlStatistics,
}

impl<S: OutputSink> CrawlEngine<S> {
    /// Creates an engine with the default extractor
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `sink` - Destination for discovered URLs
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlEngine)` - Engine ready to run
    /// * `Err(PaexError)` - The HTTP client could not be built
    pub fn new(config: CrawlConfig, sink: S) -> Result<Self, PaexError> {
        let fetcher = Fetcher::new(&config)?;
        let pool = WorkerPool::new(config.workers);

        Ok(Self {
            config,
            fetcher,
            extractor: Arc::new(Extractor::default()),
            visited: VisitedSet::new(),
            frontier: Frontier::new(),
            pool,
            sink,
            stats: CrawlStatistics::new(),
        })
    }

    /// Replaces the extractor (e.g. with a custom strategy list)
    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// The engine's configuration
    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// URLs marked visited so far
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// The output sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the engine, returning the sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Runs the crawl until the frontier is exhausted
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlStatistics)` - Counters for the completed crawl
    /// * `Err(PaexError)` - The sink failed or a worker task died
    pub async fn run(&mut self) -> Result<CrawlStatistics, PaexError> {
        let started = Instant::now();

        tracing::info!(
            "Crawling {} to depth {} with {} workers",
            self.config.seed_url,
            self.config.max_depth,
            self.pool.workers()
        );

        self.enqueue(FrontierEntry::new(self.config.seed_url.as_str(), 0));

        loop {
            let level = self.frontier.pop_level();
            if level.is_empty() {
                break;
            }
            self.run_level(level).await?;
        }

        self.stats.elapsed = started.elapsed();
        tracing::info!(
            "Crawl finished: {} pages fetched, {} URLs discovered in {:.2?}",
            self.stats.pages_fetched,
            self.stats.urls_discovered,
            self.stats.elapsed
        );

        Ok(self.stats.clone())
    }

    fn enqueue(&mut self, entry: FrontierEntry) {
        self.stats.urls_enqueued += 1;
        self.frontier.push(entry);
    }

    /// Dispatches one depth level and folds its results back in
    async fn run_level(&mut self, level: Vec<FrontierEntry>) -> Result<(), PaexError> {
        let mut dispatched = Vec::with_capacity(level.len());
        let mut batch = HashSet::new();

        for mut entry in level {
            let discard = entry.depth > self.config.max_depth
                || self.visited.contains(&entry.url)
                || !batch.insert(entry.url.clone());

            if discard {
                entry.transition(EntryState::Discarded)?;
                self.stats.record_state(entry.state());
                continue;
            }

            entry.transition(EntryState::Dispatched)?;
            dispatched.push(entry);
        }

        let Some(depth) = dispatched.first().map(|e| e.depth) else {
            return Ok(());
        };
        self.stats.deepest_level = self.stats.deepest_level.max(depth);
        tracing::info!(
            "Depth {}: fetching {} URLs ({} queued behind)",
            depth,
            dispatched.len(),
            self.frontier.len()
        );

        let jobs: Vec<_> = dispatched
            .iter()
            .map(|entry| {
                tracing::debug!("Processing {}", entry.url);
                process_unit(
                    entry.url.clone(),
                    self.fetcher.clone(),
                    Arc::clone(&self.extractor),
                    self.visited.clone(),
                )
            })
            .collect();

        let outcomes = self.pool.run_ordered(jobs).await?;

        for (mut entry, outcome) in dispatched.into_iter().zip(outcomes) {
            match outcome {
                UnitOutcome::Extracted { candidates } => {
                    self.stats.pages_fetched += 1;
                    self.stats.pages_extracted += 1;
                    self.absorb(&entry, candidates)?;
                    entry.transition(EntryState::Completed)?;
                }
                UnitOutcome::Skipped { reason, detail } => {
                    tracing::debug!("Skipped {} ({}: {})", entry.url, reason, detail);
                    if reason.marks_visited() {
                        self.stats.pages_fetched += 1;
                    }
                    self.stats.record_skip(reason);
                    self.sink.record_discovered(&[])?;
                    entry.transition(EntryState::SkippedNoExtract)?;
                }
                UnitOutcome::AlreadyVisited => {
                    entry.transition(EntryState::Discarded)?;
                }
            }
            self.stats.record_state(entry.state());
        }

        Ok(())
    }

    /// Records the candidates of one fetched page
    ///
    /// Unvisited candidates are written to the sink in discovery order, and
    /// enqueued one level deeper while that level is within the depth bound.
    fn absorb(&mut self, entry: &FrontierEntry, candidates: Vec<String>) -> Result<(), PaexError> {
        let next_depth = entry.depth + 1;
        let expand = next_depth <= self.config.max_depth;
        let mut discovered = Vec::new();

        for candidate in candidates {
            if self.visited.contains(&candidate) {
                continue;
            }
            if expand {
                self.enqueue(FrontierEntry::new(candidate.clone(), next_depth));
            }
            discovered.push(candidate);
        }

        tracing::debug!("{} yielded {} new URLs", entry.url, discovered.len());
        self.stats.urls_discovered += discovered.len() as u64;
        self.sink.record_discovered(&discovered)?;
        Ok(())
    }
}
