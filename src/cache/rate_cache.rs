//! In-memory payload cache with a freshness window.
//!
//! Unlike a classic TTL cache, expiry here never removes anything: an
//! expired entry stays in the map so it can still be served as a stale
//! fallback when the upstream is down. Validity is a separate question
//! answered by [`RateCache::is_valid`].

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// A cached payload plus the moment it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub payload: Value,
    pub fetched_at: Instant,
}

impl CacheEntry {
    /// Age of this entry relative to `now`.
    pub fn age(&self, now: Instant) -> Duration {
        now.duration_since(self.fetched_at)
    }
}

/// A thread-safe in-memory cache keyed by category cache key.
///
/// Cheap to clone (uses `Arc` internally); clones share the same map.
/// At most one entry exists per key: `insert` always overwrites. Entries
/// are only ever removed all at once by [`RateCache::clear`].
#[derive(Clone)]
pub struct RateCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    max_age: Duration,
}

impl RateCache {
    /// Create a new cache whose entries count as fresh for `max_age`.
    pub fn new(max_age: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            max_age,
        }
    }

    /// Create a cache with the freshness window given in milliseconds.
    pub fn with_millis(max_age_ms: u64) -> Self {
        Self::new(Duration::from_millis(max_age_ms))
    }

    /// Get the entry for a key, whether fresh or stale.
    ///
    /// Returns `None` only if the key was never stored (or the cache was
    /// cleared since).
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        if let Ok(entries) = self.entries.read() {
            entries.get(key).cloned()
        } else {
            None
        }
    }

    /// Store a payload under a key, stamped with the current time.
    ///
    /// Overwrites any existing entry for the key.
    pub fn insert(&self, key: &str, payload: Value) {
        let entry = CacheEntry {
            payload,
            fetched_at: Instant::now(),
        };

        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), entry);
        }
    }

    /// Whether a fresh (non-expired) entry exists for a key.
    pub fn is_valid(&self, key: &str) -> bool {
        let now = Instant::now();

        if let Ok(entries) = self.entries.read() {
            if let Some(entry) = entries.get(key) {
                return entry.age(now) < self.max_age;
            }
        }

        false
    }

    /// Remove every entry, unconditionally.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    /// Number of entries in the cache (fresh and stale alike).
    pub fn len(&self) -> usize {
        if let Ok(entries) = self.entries.read() {
            entries.len()
        } else {
            0
        }
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The configured freshness window.
    pub fn max_age(&self) -> Duration {
        self.max_age
    }
}

impl std::fmt::Debug for RateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateCache")
            .field("max_age", &self.max_age)
            .field("entries", &self.len())
            .finish()
    }
}
