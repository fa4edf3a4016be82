//! Weather API pass-through client.
//!
//! Current conditions and the five-day forecast are relayed verbatim; only
//! failures are reshaped into the dashboard's error bodies.

use reqwest::Client;
use serde_json::Value;
use tracing::{instrument, warn};

use crate::error::{ApiError, Result};
use crate::models::Location;

pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }

    /// Current conditions for a location.
    #[instrument(skip(self), level = "info")]
    pub async fn current(&self, location: &Location) -> Result<Value> {
        self.fetch("weather", location, "Error fetching weather").await
    }

    /// Five-day / three-hour forecast for a location.
    #[instrument(skip(self), level = "info")]
    pub async fn forecast(&self, location: &Location) -> Result<Value> {
        self.fetch("forecast", location, "Error fetching forecast").await
    }

    async fn fetch(
        &self,
        endpoint: &str,
        location: &Location,
        failure: &'static str,
    ) -> Result<Value> {
        let api_key = self.api_key.as_deref().ok_or(ApiError::MissingWeatherKey)?;
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut params: Vec<(&str, &str)> = match location {
            Location::City(city) => vec![("q", city.as_str())],
            Location::Coordinates { lat, lon } => {
                vec![("lat", lat.as_str()), ("lon", lon.as_str())]
            }
        };
        params.push(("units", "metric"));
        params.push(("appid", api_key));

        let response = self.client.get(&url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, endpoint, "weather API returned an error");
            return Err(ApiError::Upstream {
                status,
                message: failure,
            });
        }

        Ok(response.json().await?)
    }
}
