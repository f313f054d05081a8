//! Frontier queue and bounded worker pool
//!
//! This module handles:
//! - The FIFO frontier of `(url, depth)` entries, handed out one depth level at a time
//! - A semaphore-bounded pool that runs fetch+extract units concurrently and
//!   returns their results in submission order

use crate::state::FrontierEntry;
use crate::PaexError;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// FIFO queue of URLs awaiting fetch
///
/// Owned by the engine loop alone; workers never touch it.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry at the back of the queue
    pub fn push(&mut self, entry: FrontierEntry) {
        self.queue.push_back(entry);
    }

    /// Removes and returns the entry at the front of the queue
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    /// Removes every entry at the front that shares the front entry's depth
    ///
    /// Entries come back in insertion (discovery) order. Because the engine
    /// only enqueues at `depth + 1` while draining depth `depth`, this is the
    /// whole level.
    pub fn pop_level(&mut self) -> Vec<FrontierEntry> {
        let depth = match self.queue.front() {
            Some(entry) => entry.depth,
            None => return Vec::new(),
        };

        let mut level = Vec::new();
        while self.queue.front().is_some_and(|entry| entry.depth == depth) {
            if let Some(entry) = self.queue.pop_front() {
                level.push(entry);
            }
        }
        level
    }

    /// Returns the number of entries waiting
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Bounded-concurrency executor for fetch+extract units
///
/// At most `workers` jobs run at once; the rest wait on the semaphore until a
/// slot frees.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
    workers: usize,
}

impl WorkerPool {
    /// Creates a pool with `workers` slots (at least one)
    pub fn new(workers: usize) -> Self {
        let workers = workers.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(workers)),
            workers,
        }
    }

    /// Number of jobs that may run concurrently
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs every job on the pool and waits for all of them
    ///
    /// Results are returned in the order the jobs were given, regardless of
    /// completion order.
    ///
    /// # Errors
    ///
    /// Returns `PaexError::Worker` if a job panics or is cancelled.
    pub async fn run_ordered<F, T>(&self, jobs: Vec<F>) -> Result<Vec<T>, PaexError>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let total = jobs.len();
        let mut set = JoinSet::new();

        for (index, job) in jobs.into_iter().enumerate() {
            let semaphore = Arc::clone(&self.semaphore);
            set.spawn(async move {
                let _permit = semaphore.acquire_owned().await?;
                Ok::<_, tokio::sync::AcquireError>((index, job.await))
            });
        }

        let mut slots: Vec<Option<T>> = (0..total).map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            let (index, output) = joined
                .map_err(|e| PaexError::Worker(e.to_string()))?
                .map_err(|e| PaexError::Worker(e.to_string()))?;
            slots[index] = Some(output);
        }

        slots
            .into_iter()
            .map(|slot| {
                slot.ok_or_else(|| PaexError::Worker("job produced no result".to_string()))
            })
            .collect()
    }
}
