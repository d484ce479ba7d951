//! Cache Module
//!
//! Thread-safe in-memory response cache with interval-based expiry.
//!
//! Entries expire a fixed interval after insertion. A background task sweeps
//! stale entries once per interval, so expiry is eventual: an entry may
//! outlive its interval by up to one sweep period.

mod entry;
mod stats;
mod store;


use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::debug;

use crate::tasks::{spawn_reap_task, ReapHandle};

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;

/// Locks the store, recovering the guard if a previous holder panicked.
///
/// Every store operation leaves the map consistent, so a poisoned lock
/// carries no torn state.
pub(crate) fn lock_store(store: &Mutex<CacheStore>) -> MutexGuard<'_, CacheStore> {
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// == Cache ==
/// Self-cleaning key-value cache for opaque byte payloads.
///
/// All operations go through a single coarse lock shared with the reap task.
/// Values are copied on the way in and on the way out.
#[derive(Debug)]
pub struct Cache {
    store: Arc<Mutex<CacheStore>>,
    reaper: Option<ReapHandle>,
}

impl Cache {
    // == Constructor ==
    /// Creates a cache whose entries are swept once they are older than `interval`.
    ///
    /// A zero interval stores values indefinitely and starts no sweep task.
    /// Must be called from within a tokio runtime when `interval` is non-zero.
    pub fn new(interval: Duration) -> Self {
        let store = Arc::new(Mutex::new(CacheStore::new(interval)));
        let reaper = spawn_reap_task(store.clone());

        if reaper.is_none() {
            debug!("Cache created without expiry");
        }

        Self { store, reaper }
    }

    // == Add ==
    /// Stores a copy of `value` under `key`, replacing any previous entry.
    pub fn add(&self, key: impl Into<String>, value: &[u8]) {
        lock_store(&self.store).add(key.into(), value);
    }

    // == Get ==
    /// Returns a copy of the value under `key`, or `None` if absent.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        lock_store(&self.store).get(key)
    }

    /// Returns the expiry interval the cache was created with.
    pub fn interval(&self) -> Duration {
        lock_store(&self.store).interval()
    }

    /// Returns true if entries are subject to expiry.
    pub fn expires(&self) -> bool {
        self.reaper.is_some()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        lock_store(&self.store).stats()
    }

    /// Returns the total size of all cached payloads in bytes.
    pub fn payload_bytes(&self) -> usize {
        lock_store(&self.store).payload_bytes()
    }

    pub fn len(&self) -> usize {
        lock_store(&self.store).len()
    }

    pub fn is_empty(&self) -> bool {
        lock_store(&self.store).is_empty()
    }

    // == Close ==
    /// Stops the sweep task and waits for it to exit.
    ///
    /// Dropping a cache without closing it also stops the task, but without
    /// waiting for it.
    pub async fn close(mut self) {
        if let Some(reaper) = self.reaper.take() {
            reaper.shutdown().await;
            debug!("Cache reap task stopped");
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time;

    #[tokio::test]
    async fn test_cache_add_and_get() {
        let cache = Cache::new(Duration::from_secs(60));

        cache.add("https://pokeapi.co/api/v2/location-area", br#"{"dummy":"value"}"#);

        assert_eq!(
            cache.get("https://pokeapi.co/api/v2/location-area"),
            Some(br#"{"dummy":"value"}"#.to_vec())
        );
        assert_eq!(cache.len(), 1);
        assert!(cache.expires());

        cache.close().await;
    }

    #[tokio::test]
    async fn test_cache_miss() {
        let cache = Cache::new(Duration::from_secs(60));
        assert_eq!(cache.get("never-added"), None);
        assert!(cache.is_empty());
        cache.close().await;
    }

    #[tokio::test]
    async fn test_cache_isolation_from_caller_buffers() {
        let cache = Cache::new(Duration::from_secs(60));

        let mut buf = vec![1u8, 2, 3];
        cache.add("k", &buf);
        buf[0] = 99;

        let mut got = cache.get("k").unwrap();
        assert_eq!(got, vec![1, 2, 3]);

        got[1] = 42;
        assert_eq!(cache.get("k"), Some(vec![1, 2, 3]));

        cache.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_expires_after_interval() {
        let cache = Cache::new(Duration::from_millis(50));

        cache.add("area-1", b"canalave-city-area");
        time::sleep(Duration::from_millis(25)).await;
        assert_eq!(cache.get("area-1"), Some(b"canalave-city-area".to_vec()));

        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(cache.get("area-1"), None);
        assert_eq!(cache.stats().reaped, 1);

        cache.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_zero_interval_never_expires() {
        let cache = Cache::new(Duration::ZERO);
        assert!(!cache.expires());

        cache.add("k", b"v");
        time::sleep(Duration::from_secs(3600)).await;

        assert_eq!(cache.get("k"), Some(b"v".to_vec()));
        cache.close().await;
    }

    #[test]
    fn test_cache_zero_interval_needs_no_runtime() {
        let cache = Cache::new(Duration::ZERO);
        cache.add("k", b"v");
        assert_eq!(cache.get("k"), Some(b"v".to_vec()));
    }

    #[tokio::test]
    async fn test_cache_stats_and_payload_bytes() {
        let cache = Cache::new(Duration::from_secs(60));

        cache.add("a", b"12345");
        cache.get("a");
        cache.get("b");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(cache.payload_bytes(), 5);
        assert_eq!(cache.interval(), Duration::from_secs(60));

        cache.close().await;
    }
}
