//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::background::rate_limit::DEFAULT_THRESHOLD;
use crate::cache::{DEFAULT_CAPACITY, DEFAULT_TTL};
use crate::upstream::openweather::OPENWEATHER_API_BASE;
use crate::upstream::unsplash::UNSPLASH_API_BASE;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Missing API credentials are not a startup error; the endpoints that need
/// them report the misconfiguration per request.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Photo API access key
    pub unsplash_access_key: Option<String>,
    /// Photo API base URL
    pub unsplash_base_url: String,
    /// Weather API key
    pub weather_api_key: Option<String>,
    /// Weather API base URL
    pub weather_base_url: String,
    /// Directory served for every path not claimed by an API route
    pub static_dir: PathBuf,
    /// Maximum number of cached backgrounds
    pub bg_cache_capacity: usize,
    /// Lifetime of a cached background
    pub bg_cache_ttl: Duration,
    /// Photo API headroom at or below which new calls are refused
    pub rate_limit_threshold: i64,
    /// Timeout for every outbound request
    pub upstream_timeout: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `UNSPLASH_ACCESS_KEY` - Photo API key (default: unset)
    /// - `UNSPLASH_API_URL` - Photo API base URL
    /// - `API_KEY` - Weather API key (default: unset)
    /// - `OPENWEATHER_API_URL` - Weather API base URL
    /// - `STATIC_DIR` - Static asset directory (default: `public`)
    /// - `BG_CACHE_CAPACITY` - Cached backgrounds (default: 50)
    /// - `BG_CACHE_TTL_SECS` - Background lifetime in seconds (default: 3600)
    /// - `RATE_LIMIT_THRESHOLD` - Headroom floor (default: 5)
    /// - `UPSTREAM_TIMEOUT_SECS` - Outbound request timeout (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            unsplash_access_key: secret_var("UNSPLASH_ACCESS_KEY"),
            unsplash_base_url: env::var("UNSPLASH_API_URL")
                .unwrap_or(defaults.unsplash_base_url),
            weather_api_key: secret_var("API_KEY"),
            weather_base_url: env::var("OPENWEATHER_API_URL")
                .unwrap_or(defaults.weather_base_url),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            bg_cache_capacity: parse_var("BG_CACHE_CAPACITY")
                .unwrap_or(defaults.bg_cache_capacity),
            bg_cache_ttl: parse_var("BG_CACHE_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.bg_cache_ttl),
            rate_limit_threshold: parse_var("RATE_LIMIT_THRESHOLD")
                .unwrap_or(defaults.rate_limit_threshold),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.upstream_timeout),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            unsplash_access_key: None,
            unsplash_base_url: UNSPLASH_API_BASE.to_string(),
            weather_api_key: None,
            weather_base_url: OPENWEATHER_API_BASE.to_string(),
            static_dir: PathBuf::from("public"),
            bg_cache_capacity: DEFAULT_CAPACITY,
            bg_cache_ttl: DEFAULT_TTL,
            rate_limit_threshold: DEFAULT_THRESHOLD,
            upstream_timeout: Duration::from_secs(10),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Credentials set to an empty string count as unset.
fn secret_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert!(config.unsplash_access_key.is_none());
        assert_eq!(config.unsplash_base_url, "https://api.unsplash.com");
        assert_eq!(config.bg_cache_capacity, 50);
        assert_eq!(config.bg_cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.rate_limit_threshold, 5);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        for name in [
            "PORT",
            "UNSPLASH_ACCESS_KEY",
            "UNSPLASH_API_URL",
            "API_KEY",
            "STATIC_DIR",
            "BG_CACHE_CAPACITY",
            "BG_CACHE_TTL_SECS",
            "RATE_LIMIT_THRESHOLD",
        ] {
            env::remove_var(name);
        }

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert!(config.unsplash_access_key.is_none());
        assert!(config.weather_api_key.is_none());
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert_eq!(config.bg_cache_capacity, 50);
        assert_eq!(config.rate_limit_threshold, 5);
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("WEATHER_DASH_TEST_NUMBER", "not-a-number");
        assert_eq!(parse_var::<u16>("WEATHER_DASH_TEST_NUMBER"), None);

        env::set_var("WEATHER_DASH_TEST_NUMBER", " 8080 ");
        assert_eq!(parse_var::<u16>("WEATHER_DASH_TEST_NUMBER"), Some(8080));
        env::remove_var("WEATHER_DASH_TEST_NUMBER");
    }

    #[test]
    fn test_secret_var_empty_is_unset() {
        env::set_var("WEATHER_DASH_TEST_SECRET", "");
        assert_eq!(secret_var("WEATHER_DASH_TEST_SECRET"), None);

        env::set_var("WEATHER_DASH_TEST_SECRET", "abc");
        assert_eq!(secret_var("WEATHER_DASH_TEST_SECRET").as_deref(), Some("abc"));
        env::remove_var("WEATHER_DASH_TEST_SECRET");
    }
}
