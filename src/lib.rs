//! Weather Dash - backend for a weather dashboard
//!
//! Proxies the weather API, serves the static client and picks decorative
//! background photos per weather condition through a bounded TTL cache that
//! backs off when the photo API runs low on headroom.

pub mod api;
pub mod background;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use error::ApiError;
