//! Frontier entry definitions for tracking crawl progress
//!
//! Every `(url, depth)` pair accepted into the frontier moves through
//! `Queued -> Dispatched -> {Completed | SkippedNoExtract}`, or is dropped as
//! `Discarded` when it is dequeued but not eligible for fetching.

use crate::PaexError;
use std::fmt;

/// Represents the current state of a frontier entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryState {
    // ===== Active States =====
    /// Waiting in the frontier queue
    Queued,

    /// Handed to the worker pool; fetch+extract in flight
    Dispatched,

    // ===== Terminal States =====
    /// Fetched as text and run through the extractor
    Completed,

    /// Fetch finished without extraction (error, non-200, binary, bad UTF-8)
    SkippedNoExtract,

    /// Dequeued but never fetched (too deep, already visited, or a duplicate
    /// within the same level)
    Discarded,
}

impl EntryState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Returns true if this entry may still be processed
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Queued | Self::Dispatched)
    }

    /// Returns true if the state machine permits moving to `to`
    pub fn can_transition_to(&self, to: EntryState) -> bool {
        matches!(
            (self, to),
            (Self::Queued, Self::Dispatched)
                | (Self::Queued, Self::Discarded)
                | (Self::Dispatched, Self::Completed)
                | (Self::Dispatched, Self::SkippedNoExtract)
                | (Self::Dispatched, Self::Discarded)
        )
    }

    /// Returns the lowercase name used in logs and statistics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Dispatched => "dispatched",
            Self::Completed => "completed",
            Self::SkippedNoExtract => "skipped_no_extract",
            Self::Discarded => "discarded",
        }
    }

    /// Returns all possible entry states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Queued,
            Self::Dispatched,
            Self::Completed,
            Self::SkippedNoExtract,
            Self::Discarded,
        ]
    }
}

impl fmt::Display for EntryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A URL waiting in (or taken from) the frontier, tagged with its discovery depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// The URL exactly as it was discovered
    pub url: String,

    /// Link hops from the seed (seed is 0)
    pub depth: u32,

    state: EntryState,
}

impl FrontierEntry {
    /// Creates a new entry in the `Queued` state
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            depth,
            state: EntryState::Queued,
        }
    }

    /// Current state of this entry
    pub fn state(&self) -> EntryState {
        self.state
    }

    /// Moves the entry to `to`, rejecting transitions the state machine forbids
    pub fn transition(&mut self, to: EntryState) -> Result<(), PaexError> {
        if !self.state.can_transition_to(to) {
            return Err(PaexError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        tracing::trace!("{} [{}]: {} -> {}", self.url, self.depth, self.state, to);
        self.state = to;
        Ok(())
    }
}
