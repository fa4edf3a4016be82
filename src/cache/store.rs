//! Cache Store Module
//!
//! Bounded cache engine combining HashMap storage with LRU tracking and lazy
//! TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use tracing::trace;

use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Cache Store ==
/// Key-value cache holding at most `capacity` entries, each living for `ttl`.
///
/// Expired entries are only dropped when a lookup stumbles on them; there is
/// no background sweep.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Lifetime of every entry
    ttl: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and TTL.
    ///
    /// A capacity of zero is raised to one so a fresh `put` is always
    /// observable.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity: capacity.max(1),
            ttl,
        }
    }

    // == Get ==
    /// Retrieves a fresh value by key, marking it most recently used.
    ///
    /// An expired entry is removed and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_expired(self.ttl) {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            trace!(key, "cache entry expired");
            return None;
        }

        let value = entry.value.clone();
        trace!(key, ttl_remaining = ?entry.ttl_remaining(self.ttl), "cache hit");
        self.lru.touch(key);
        self.stats.record_hit();
        Some(value)
    }

    // == Put ==
    /// Stores a value under `key` at the most-recently-used position.
    ///
    /// Re-inserting an existing key replaces its value and restarts its TTL.
    /// Least recently used entries are evicted until the store is back
    /// within capacity.
    pub fn put(&mut self, key: String, value: V) {
        if self.entries.remove(&key).is_some() {
            self.lru.remove(&key);
        }

        self.lru.touch(&key);
        self.entries.insert(key, CacheEntry::new(value));

        while self.entries.len() > self.capacity {
            let Some(evicted) = self.lru.evict_oldest() else {
                break;
            };
            self.entries.remove(&evicted);
            self.stats.record_eviction();
            trace!(key = %evicted, "cache entry evicted");
        }

        self.stats.set_total_entries(self.entries.len());
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included until
    /// they are next looked up.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
