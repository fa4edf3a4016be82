//! API Handlers
//!
//! HTTP request handlers for each dashboard endpoint.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;

use crate::background::{BackgroundService, RateLimitGuard};
use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    Background, BackgroundQuery, HealthResponse, Location, LocationQuery, PhotoQuery,
    PhotoResponse, StatsResponse,
};
use crate::upstream::{build_http_client, UnsplashClient, WeatherClient};

const MISSING_LOCATION_MESSAGE: &str = "City or lat/lon parameters are required";
const MISSING_QUERY_MESSAGE: &str = "Query parameter is required";

/// Application state shared across all handlers.
///
/// Everything stateful is constructed explicitly and injected here, so every
/// router (and every test) gets its own isolated cache and guard.
#[derive(Clone)]
pub struct AppState {
    /// Background cache, rate-limit guard and photo client
    pub background: Arc<BackgroundService>,
    /// Weather pass-through client
    pub weather: Arc<WeatherClient>,
    /// Directory for the static fallback
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(background: BackgroundService, weather: WeatherClient, static_dir: PathBuf) -> Self {
        Self {
            background: Arc::new(background),
            weather: Arc::new(weather),
            static_dir,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails only if the outbound HTTP client cannot be built.
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let client = build_http_client(config.upstream_timeout)?;

        let photos = UnsplashClient::new(
            client.clone(),
            config.unsplash_base_url.clone(),
            config.unsplash_access_key.clone(),
        );
        let background = BackgroundService::new(
            CacheStore::new(config.bg_cache_capacity, config.bg_cache_ttl),
            RateLimitGuard::new(config.rate_limit_threshold),
            photos,
        );
        let weather = WeatherClient::new(
            client,
            config.weather_base_url.clone(),
            config.weather_api_key.clone(),
        );

        Ok(Self::new(background, weather, config.static_dir.clone()))
    }
}

/// Handler for GET /api/bg
///
/// Resolves a weather condition to a background photo and its attribution.
pub async fn background_handler(
    State(state): State<AppState>,
    Query(params): Query<BackgroundQuery>,
) -> Result<Json<Background>> {
    let background = state
        .background
        .resolve(params.condition.as_deref())
        .await?;
    Ok(Json(background))
}

/// Handler for GET /api/bg/stats
pub async fn background_stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.background.stats().await;
    Json(StatsResponse::new(&stats, state.background.guard().remaining()))
}

/// Handler for GET /photo
///
/// Uncached random photo lookup for an arbitrary query.
pub async fn photo_handler(
    State(state): State<AppState>,
    Query(params): Query<PhotoQuery>,
) -> Result<Json<PhotoResponse>> {
    let query = params
        .query
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest(MISSING_QUERY_MESSAGE.to_string()))?;

    let background = &state.background;
    let url = background.photos().photo_url(&query, background.guard()).await?;
    Ok(Json(PhotoResponse { url }))
}

/// Handler for GET /weather
pub async fn weather_handler(
    State(state): State<AppState>,
    Query(params): Query<LocationQuery>,
) -> Result<Json<Value>> {
    let location = require_location(&params)?;
    Ok(Json(state.weather.current(&location).await?))
}

/// Handler for GET /forecast
pub async fn forecast_handler(
    State(state): State<AppState>,
    Query(params): Query<LocationQuery>,
) -> Result<Json<Value>> {
    let location = require_location(&params)?;
    Ok(Json(state.weather.forecast(&location).await?))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

fn require_location(params: &LocationQuery) -> Result<Location> {
    params
        .location()
        .ok_or_else(|| ApiError::BadRequest(MISSING_LOCATION_MESSAGE.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        AppState::from_config(&Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_background_handler_requires_condition() {
        let result =
            background_handler(State(test_state()), Query(BackgroundQuery::default())).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_background_handler_without_key() {
        let params = BackgroundQuery {
            condition: Some("clear".to_string()),
        };
        let result = background_handler(State(test_state()), Query(params)).await;
        assert!(matches!(result, Err(ApiError::MissingCredential)));
    }

    #[tokio::test]
    async fn test_photo_handler_requires_query() {
        let result = photo_handler(State(test_state()), Query(PhotoQuery::default())).await;
        match result {
            Err(ApiError::BadRequest(msg)) => assert_eq!(msg, MISSING_QUERY_MESSAGE),
            _ => panic!("expected bad request"),
        }
    }

    #[tokio::test]
    async fn test_weather_handlers_require_location() {
        let result = weather_handler(State(test_state()), Query(LocationQuery::default())).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));

        let result = forecast_handler(State(test_state()), Query(LocationQuery::default())).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_weather_handler_without_key() {
        let params = LocationQuery {
            city: Some("Toronto".to_string()),
            ..Default::default()
        };
        let result = weather_handler(State(test_state()), Query(params)).await;
        assert!(matches!(result, Err(ApiError::MissingWeatherKey)));
    }

    #[tokio::test]
    async fn test_stats_handler_fresh_state() {
        let response = background_stats_handler(State(test_state())).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.total_entries, 0);
        assert_eq!(response.rate_limit_remaining, None);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
