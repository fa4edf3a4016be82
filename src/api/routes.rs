//! API Routes
//!
//! Configures the Axum router with every dashboard endpoint and the static
//! asset fallback.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers::{
    background_handler, background_stats_handler, forecast_handler, health_handler,
    photo_handler, weather_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/bg` - Background photo for a weather condition
/// - `GET /api/bg/stats` - Background cache and headroom statistics
/// - `GET /photo` - Uncached random photo for a query
/// - `GET /weather` - Current conditions pass-through
/// - `GET /forecast` - Forecast pass-through
/// - `GET /health` - Health check endpoint
/// - anything else - served from the static directory
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/api/bg", get(background_handler))
        .route("/api/bg/stats", get(background_stats_handler))
        .route("/photo", get(photo_handler))
        .route("/weather", get(weather_handler))
        .route("/forecast", get(forecast_handler))
        .route("/health", get(health_handler))
        .fallback_service(static_files)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
