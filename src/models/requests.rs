//! Request DTOs for the dashboard API
//!
//! Query-string shapes for each endpoint. Every parameter is optional at the
//! extractor level so a missing one is reported with the endpoint's own
//! message instead of axum's generic rejection.

use serde::Deserialize;

/// Query for `GET /api/bg`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackgroundQuery {
    /// Raw weather-condition token, e.g. "Clear"
    pub condition: Option<String>,
}

/// Query for `GET /photo`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoQuery {
    pub query: Option<String>,
}

/// Query for `GET /weather` and `GET /forecast`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationQuery {
    pub city: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// Where to look up weather for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    City(String),
    Coordinates { lat: String, lon: String },
}

impl LocationQuery {
    /// Resolves the query into a location.
    ///
    /// Coordinates win when both forms are present; a lone `lat` or `lon`
    /// does not count. Empty values are treated as missing.
    pub fn location(&self) -> Option<Location> {
        let present = |v: &Option<String>| {
            v.as_deref()
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        if let (Some(lat), Some(lon)) = (present(&self.lat), present(&self.lon)) {
            return Some(Location::Coordinates { lat, lon });
        }
        present(&self.city).map(Location::City)
    }
}
