//! Upstream Module
//!
//! Outbound clients for the third-party APIs the dashboard proxies.

pub mod openweather;
pub mod types;
pub mod unsplash;

pub use openweather::WeatherClient;
pub use unsplash::UnsplashClient;

use std::time::Duration;

use reqwest::Client;

const USER_AGENT: &str = concat!("weather_dash/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client shared by every upstream.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}
