//! In-memory memoization of finished summaries.
//!
//! Entries are keyed by the trimmed place text and the normalized day range,
//! so trips in different years that share a month/day window hit the same
//! entry. The cache holds at most `capacity` summaries and evicts the least
//! recently used one when full.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;

use crate::period::NormalizedDayRange;
use crate::report::ClimateSummary;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    place: String,
    range: NormalizedDayRange,
}

impl CacheKey {
    #[must_use]
    pub fn new(place: &str, range: &NormalizedDayRange) -> Self {
        Self {
            place: place.trim().to_string(),
            range: range.clone(),
        }
    }
}

/// Bounded LRU cache shared between concurrent invocations. Cloning shares
/// the same underlying storage.
#[derive(Clone)]
pub struct SummaryCache {
    entries: Option<Arc<Mutex<LruCache<CacheKey, ClimateSummary>>>>,
}

impl SummaryCache {
    /// A cache holding at most `capacity` summaries; 0 disables caching
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: NonZeroUsize::new(capacity)
                .map(|capacity| Arc::new(Mutex::new(LruCache::new(capacity)))),
        }
    }

    /// A cache that never stores anything
    #[must_use]
    pub fn disabled() -> Self {
        Self { entries: None }
    }

    #[tracing::instrument(name = "query_cache", level = "debug", skip(self))]
    pub fn get(&self, key: &CacheKey) -> Option<ClimateSummary> {
        let entries = self.entries.as_ref()?;
        // poisoned lock reads as a miss
        let mut entries = entries.lock().ok()?;
        let hit = entries.get(key).cloned();
        if hit.is_some() {
            tracing::debug!("Key found");
        } else {
            tracing::debug!("Key not found");
        }
        hit
    }

    #[tracing::instrument(name = "put_cache", level = "debug", skip(self, summary))]
    pub fn put(&self, key: CacheKey, summary: ClimateSummary) {
        let Some(entries) = self.entries.as_ref() else {
            return;
        };
        if let Ok(mut entries) = entries.lock() {
            if let Some((dropped, _)) = entries.push(key, summary) {
                tracing::debug!(?dropped, "Dropped cached summary");
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .as_ref()
            .and_then(|entries| entries.lock().ok().map(|entries| entries.len()))
            .unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SummaryCache {
    fn default() -> Self {
        Self::new(32)
    }
}
