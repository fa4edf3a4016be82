//! Cache Module
//!
//! Provides a bounded in-memory cache with lazy TTL expiration and LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

use std::time::Duration;

// == Public Constants ==
/// Maximum number of resolved backgrounds kept in memory
pub const DEFAULT_CAPACITY: usize = 50;

/// How long a resolved background stays fresh
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);
