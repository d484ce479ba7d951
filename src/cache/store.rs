//! Cache Store Module
//!
//! The unsynchronized map behind the cache. Callers serialize access through
//! the single lock held by [`Cache`](crate::cache::Cache).

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key to entry mapping with a fixed expiry interval.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Expiry threshold; zero means entries never expire
    interval: Duration,
    /// Lookup and sweep counters
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries expire `interval` after insertion.
    pub fn new(interval: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            interval,
            stats: CacheStats::new(),
        }
    }

    /// Returns the configured expiry interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    // == Add ==
    /// Stores a copy of `value` under `key`.
    ///
    /// Any existing entry for the key is replaced and its age starts over.
    pub fn add(&mut self, key: String, value: &[u8]) {
        self.add_at(key, value, Instant::now());
    }

    /// Stores a copy of `value` stamped with an explicit creation instant.
    pub fn add_at(&mut self, key: String, value: &[u8], now: Instant) {
        trace!(key = %key, bytes = value.len(), "cache add");
        self.entries.insert(key, CacheEntry::with_created_at(value, now));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns a copy of the value stored under `key`.
    ///
    /// Lookups never refresh an entry's age.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                trace!(key, age_ms = entry.age(Instant::now()).as_millis() as u64, "cache hit");
                Some(entry.value())
            }
            None => {
                self.stats.record_miss();
                trace!(key, "cache miss");
                None
            }
        }
    }

    /// Returns the creation instant of the entry under `key`, if any.
    pub fn created_at(&self, key: &str) -> Option<Instant> {
        self.entries.get(key).map(CacheEntry::inserted_at)
    }

    // == Reap ==
    /// Removes every entry created strictly before `now - interval`.
    ///
    /// A zero interval disables expiry and removes nothing. Returns the number
    /// of entries removed.
    pub fn reap(&mut self, now: Instant) -> usize {
        if self.interval.is_zero() {
            return 0;
        }

        let Some(cutoff) = now.checked_sub(self.interval) else {
            return 0;
        };

        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_stale(cutoff));
        let removed = before - self.entries.len();

        self.stats.record_reaped(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the total payload size held by the store.
    pub fn payload_bytes(&self) -> usize {
        self.entries.values().map(CacheEntry::len).sum()
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
