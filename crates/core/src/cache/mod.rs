//! In-memory cache with a single time-to-live.
//!
//! Entries are never swept; expiry is evaluated lazily on `get`, so an entry
//! older than the TTL simply reads as absent until it is overwritten, removed
//! or cleared. The clock is injected so expiry can be tested without sleeping.

pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

/// Default time-to-live in seconds (30 minutes).
pub const DEFAULT_TTL_SECS: i64 = 30 * 60;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: DateTime<Utc>,
}

/// Key/value store whose entries expire a fixed duration after they were stored.
pub struct ExpiringCache<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> ExpiringCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Create a cache backed by the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { entries: RwLock::new(HashMap::new()), ttl, clock }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the value for `key` if it was stored no longer than the TTL ago.
    ///
    /// Reading does not refresh the entry's age.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let entries = self.entries.read();
        let entry = entries.get(key)?;
        if now - entry.stored_at <= self.ttl { Some(entry.value.clone()) } else { None }
    }

    /// Store `value` under `key`, replacing any previous entry and resetting its age.
    pub fn set(&self, key: K, value: V) {
        let stored_at = self.clock.now();
        self.entries.write().insert(key, CacheEntry { value, stored_at });
    }

    pub fn remove(&self, key: &K) {
        self.entries.write().remove(key);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut entries = self.entries.write();
        let dropped = entries.len();
        entries.clear();
        tracing::info!(dropped, "cache cleared");
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<K, V> std::fmt::Debug for ExpiringCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("entries", &self.entries.read().len())
            .field("ttl", &self.ttl)
            .finish()
    }
}
