//! Background resolution service.
//!
//! Owns the background cache and the rate-limit guard and answers "which photo
//! should the page show for this condition".

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::background::{normalize_condition, RateLimitGuard};
use crate::cache::{CacheStats, CacheStore};
use crate::error::{ApiError, Result};
use crate::models::Background;
use crate::upstream::UnsplashClient;

/// Error body for a request without a condition
pub const MISSING_CONDITION_MESSAGE: &str = "condition parameter is required";

/// Resolves weather conditions to cached or freshly fetched backgrounds.
///
/// One instance per process, shared through `AppState`. The cache lock is
/// only held for the lookup and the store, never across an upstream call, so
/// two concurrent misses for the same query may both reach the photo API and
/// the last one to finish wins the cache slot.
#[derive(Debug)]
pub struct BackgroundService {
    cache: RwLock<CacheStore<Background>>,
    guard: RateLimitGuard,
    photos: UnsplashClient,
}

impl BackgroundService {
    pub fn new(
        cache: CacheStore<Background>,
        guard: RateLimitGuard,
        photos: UnsplashClient,
    ) -> Self {
        Self {
            cache: RwLock::new(cache),
            guard,
            photos,
        }
    }

    /// Resolves a raw condition to a background.
    ///
    /// Cache hits are served even while the guard is tripped; only a miss in
    /// that state is refused with `Throttled`.
    pub async fn resolve(&self, condition: Option<&str>) -> Result<Background> {
        let condition = condition
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ApiError::BadRequest(MISSING_CONDITION_MESSAGE.to_string()))?;

        let query = normalize_condition(condition);

        // Write lock: a hit moves the entry to the front
        let cached = self.cache.write().await.get(&query);
        if let Some(background) = cached {
            debug!(%query, "background cache hit");
            return Ok(background);
        }

        if !self.guard.can_call() {
            warn!(
                %query,
                remaining = ?self.guard.remaining(),
                "photo API headroom exhausted, refusing cache miss"
            );
            return Err(ApiError::Throttled);
        }

        let background = self.photos.resolve(&query, &self.guard).await?;
        info!(%query, "background resolved from photo API");

        self.cache.write().await.put(query, background.clone());
        Ok(background)
    }

    /// Current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    pub fn guard(&self) -> &RateLimitGuard {
        &self.guard
    }

    pub fn photos(&self) -> &UnsplashClient {
        &self.photos
    }
}
