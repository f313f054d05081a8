//! Crawl statistics
//!
//! Counters gathered by the engine while it runs, and a plain-text report for
//! the end of a run.

use crate::crawler::SkipReason;
use crate::state::EntryState;
use std::collections::HashMap;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// URLs that answered HTTP 200 (and so entered the visited set)
    pub pages_fetched: u64,

    /// Pages run through the extractor
    pub pages_extracted: u64,

    /// Fetches that produced nothing to extract, by reason
    pub skipped: HashMap<SkipReason, u64>,

    /// Final state of every frontier entry
    pub entries_by_state: HashMap<EntryState, u64>,

    /// URLs written to the output sink
    pub urls_discovered: u64,

    /// Entries added to the frontier (seed included)
    pub urls_enqueued: u64,

    /// Deepest level that had at least one fetch dispatched
    pub deepest_level: u32,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Creates an empty statistics record
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a skipped fetch
    pub fn record_skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_insert(0) += 1;
    }

    /// Counts an entry reaching its final state
    pub fn record_state(&mut self, state: EntryState) {
        *self.entries_by_state.entry(state).or_insert(0) += 1;
    }

    /// Number of fetches skipped for `reason`
    pub fn skipped_count(&self, reason: SkipReason) -> u64 {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    /// Number of entries that ended in `state`
    pub fn state_count(&self, state: EntryState) -> u64 {
        self.entries_by_state.get(&state).copied().unwrap_or(0)
    }

    /// Total fetches skipped for any reason
    pub fn total_skipped(&self) -> u64 {
        self.skipped.values().sum()
    }

    /// Pages fetched per second of wall-clock time
    pub fn pages_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.pages_fetched as f64 / secs
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Pages fetched: {}", stats.pages_fetched);
    println!("  Pages parsed for links: {}", stats.pages_extracted);
    println!("  URLs discovered: {}", stats.urls_discovered);
    println!("  URLs enqueued: {}", stats.urls_enqueued);
    println!("  Deepest level reached: {}", stats.deepest_level);
    println!(
        "  Elapsed: {:.2?} ({:.2} pages/sec)",
        stats.elapsed,
        stats.pages_per_second()
    );
    println!();

    if !stats.entries_by_state.is_empty() {
        println!("Frontier Entries by State:");
        let mut state_counts: Vec<_> = stats.entries_by_state.iter().collect();
        state_counts.sort_by(|a, b| b.1.cmp(a.1));
        for (state, count) in state_counts {
            println!("  {}: {}", state, count);
        }
        println!();
    }

    if stats.total_skipped() > 0 {
        println!("Skipped Fetches:");
        for reason in SkipReason::all() {
            let count = stats.skipped_count(reason);
            if count > 0 {
                println!("  {}: {}", reason, count);
            }
        }
        println!();
    }
}
