use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// The set of URLs fetched successfully during this run
///
/// Cheap to clone; all clones share the same set. Every operation takes the
/// lock for its full duration, so `check_and_mark` is an atomic test-and-set
/// across concurrent fetch units. Membership only ever grows.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl VisitedSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `url` as visited
    ///
    /// Returns `true` if this call inserted it, `false` if it was already
    /// present.
    pub fn check_and_mark(&self, url: &str) -> bool {
        let mut visited = self.lock();
        if visited.contains(url) {
            false
        } else {
            visited.insert(url.to_string())
        }
    }

    /// Returns true if `url` has been visited
    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    /// Number of visited URLs
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been visited yet
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        // A panic while holding the lock cannot leave a HashSet half-inserted
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
