//! API Module
//!
//! HTTP handlers and routing for the dashboard server.
//!
//! # Endpoints
//! - `GET /api/bg` - Background photo for a weather condition
//! - `GET /api/bg/stats` - Background cache statistics
//! - `GET /photo` - Random photo for a query
//! - `GET /weather` - Current weather
//! - `GET /forecast` - Five-day forecast
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
