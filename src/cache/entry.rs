//! Cache Entry Module
//!
//! Defines the immutable snapshot stored for each cached key.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A stored payload together with the instant it was inserted.
///
/// Entries are never mutated in place. Re-adding a key replaces the whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Cache-owned copy of the payload
    value: Box<[u8]>,
    /// Insertion time on the monotonic clock
    created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry holding a private copy of `value`, stamped with the current instant.
    pub fn new(value: &[u8]) -> Self {
        Self::with_created_at(value, Instant::now())
    }

    /// Creates an entry with an explicit creation instant.
    pub fn with_created_at(value: &[u8], created_at: Instant) -> Self {
        Self {
            value: Box::from(value),
            created_at,
        }
    }

    // == Accessors ==
    /// Returns an independent copy of the payload.
    pub fn value(&self) -> Vec<u8> {
        self.value.to_vec()
    }

    /// Returns the payload length in bytes.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns true if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns the instant the entry was inserted.
    pub fn inserted_at(&self) -> Instant {
        self.created_at
    }

    // == Is Stale ==
    /// Checks whether the entry was created strictly before `cutoff`.
    ///
    /// An entry created exactly at the cutoff is still live.
    pub fn is_stale(&self, cutoff: Instant) -> bool {
        self.created_at < cutoff
    }

    /// Returns how long ago the entry was inserted, relative to `now`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }
}
