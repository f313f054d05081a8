//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `FrontierEntry` / `EntryState`: a `(url, depth)` pair and where it is in its lifecycle
//! - `VisitedSet`: URLs fetched successfully this run, shared across workers

mod entry_state;
mod visited;

// Re-export main types
pub use entry_state::{EntryState, FrontierEntry};
pub use visited::VisitedSet;
