//! Rate-Limit Guard
//!
//! Remembers the headroom the photo API last reported and stops new upstream
//! calls once it runs low. Cache hits are never gated.

use std::sync::atomic::{AtomicI64, Ordering};

use axum::http::HeaderMap;
use tracing::debug;

/// Response header carrying the remaining call count
pub const RATE_LIMIT_HEADER: &str = "x-ratelimit-remaining";

/// Upstream calls stop once headroom is at or below this
pub const DEFAULT_THRESHOLD: i64 = 5;

/// Headroom assumed when the header is missing or unreadable
const FALLBACK_REMAINING: i64 = 50;

/// Nothing observed yet; the first call must never be blocked
const UNBOUNDED: i64 = i64::MAX;

// == Rate Limit Guard ==
/// Advisory gate in front of the photo API.
///
/// The remaining count is a single scalar overwritten after each completed
/// upstream call. Concurrent requests may read a stale value, which at worst
/// lets one extra call through.
#[derive(Debug)]
pub struct RateLimitGuard {
    remaining: AtomicI64,
    threshold: i64,
}

impl RateLimitGuard {
    pub fn new(threshold: i64) -> Self {
        Self {
            remaining: AtomicI64::new(UNBOUNDED),
            threshold,
        }
    }

    /// Whether a new upstream call may be attempted.
    pub fn can_call(&self) -> bool {
        self.remaining.load(Ordering::Relaxed) > self.threshold
    }

    /// Records the raw header value from a completed upstream response.
    pub fn record_response(&self, header: Option<&str>) {
        let remaining = header
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(FALLBACK_REMAINING);
        self.remaining.store(remaining, Ordering::Relaxed);
        debug!(remaining, "photo API headroom updated");
    }

    /// Records headroom straight from response headers.
    pub fn record_headers(&self, headers: &HeaderMap) {
        let value = headers
            .get(RATE_LIMIT_HEADER)
            .and_then(|v| v.to_str().ok());
        self.record_response(value);
    }

    /// Last observed headroom, or `None` while nothing has been observed.
    pub fn remaining(&self) -> Option<i64> {
        match self.remaining.load(Ordering::Relaxed) {
            UNBOUNDED => None,
            n => Some(n),
        }
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }
}

impl Default for RateLimitGuard {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
