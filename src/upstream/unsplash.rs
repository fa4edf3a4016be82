//! Photo API client.
//!
//! Fetches random photos for a search query, records the rate-limit headroom
//! reported on every response and fires the download-tracking ping the API
//! guidelines require.

use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use tracing::{instrument, warn};

use crate::background::RateLimitGuard;
use crate::error::{ApiError, Result};
use crate::models::Background;
use crate::tasks::spawn_download_tracking;
use crate::upstream::types::{Photo, PhotoPayload};

pub const UNSPLASH_API_BASE: &str = "https://api.unsplash.com";

/// Error body sent when the photo API answers with a non-success status
pub const IMAGE_ERROR_MESSAGE: &str = "Error fetching image";

const PLATFORM_URL: &str = "https://unsplash.com/";
const REFERRAL: &str = "utm_source=mega-dash&utm_medium=referral";

#[derive(Debug, Clone)]
pub struct UnsplashClient {
    client: Client,
    base_url: String,
    access_key: Option<String>,
}

impl UnsplashClient {
    pub fn new(client: Client, base_url: impl Into<String>, access_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key: access_key.filter(|k| !k.is_empty()),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.access_key.is_some()
    }

    fn authorization(&self) -> Result<String> {
        self.access_key
            .as_deref()
            .map(|key| format!("Client-ID {}", key))
            .ok_or(ApiError::MissingCredential)
    }

    /// Resolves a search query to a landscape background with attribution.
    ///
    /// Fails with `MissingCredential` before any request is made when no
    /// access key is configured.
    #[instrument(skip(self, guard), level = "info")]
    pub async fn resolve(&self, query: &str, guard: &RateLimitGuard) -> Result<Background> {
        let authorization = self.authorization()?;
        let photo = self
            .random_photo(
                &authorization,
                &[
                    ("query", query),
                    ("orientation", "landscape"),
                    ("content_filter", "high"),
                    ("count", "1"),
                ],
                guard,
            )
            .await?;

        if let Some(location) = photo.download_location() {
            // Detached: the response never waits on the tracking ping
            let _ = spawn_download_tracking(
                self.client.clone(),
                location.to_string(),
                authorization,
            );
        }

        Ok(Background {
            attribution: attribution(&photo),
            url: photo.urls.regular,
        })
    }

    /// Plain random-photo lookup returning only the image URL.
    #[instrument(skip(self, guard), level = "info")]
    pub async fn photo_url(&self, query: &str, guard: &RateLimitGuard) -> Result<String> {
        let authorization = self.authorization()?;
        let photo = self
            .random_photo(&authorization, &[("query", query)], guard)
            .await?;
        Ok(photo.urls.regular)
    }

    async fn random_photo(
        &self,
        authorization: &str,
        params: &[(&str, &str)],
        guard: &RateLimitGuard,
    ) -> Result<Photo> {
        let url = format!("{}/photos/random", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, authorization)
            .query(params)
            .send()
            .await?;

        guard.record_headers(response.headers());

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "photo API returned an error");
            return Err(ApiError::Upstream {
                status,
                message: IMAGE_ERROR_MESSAGE,
            });
        }

        let payload: PhotoPayload = response.json().await?;
        payload
            .into_first()
            .ok_or_else(|| ApiError::Internal("photo API returned no photos".to_string()))
    }
}

/// Credit line linking the photographer and the platform, both tagged with
/// the referral parameters.
fn attribution(photo: &Photo) -> String {
    format!(
        "Photo by <a href=\"{}?{}\">{}</a> / <a href=\"{}?{}\">Unsplash</a>",
        escape_html(&photo.user.links.html),
        REFERRAL,
        escape_html(&photo.user.name),
        PLATFORM_URL,
        REFERRAL,
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn photo_body(server: &MockServer) -> serde_json::Value {
        json!([{
            "urls": { "regular": "https://images.example/sunny.jpg" },
            "user": { "name": "Ada Lovelace", "links": { "html": "https://unsplash.com/@ada" } },
            "links": { "download_location": format!("{}/photos/abc/download", server.uri()) }
        }])
    }

    fn client_for(server: &MockServer, key: Option<&str>) -> UnsplashClient {
        UnsplashClient::new(Client::new(), server.uri(), key.map(String::from))
    }

    async fn wait_for_requests(server: &MockServer, expected: usize) -> usize {
        for _ in 0..50 {
            let count = server.received_requests().await.unwrap_or_default().len();
            if count >= expected {
                return count;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        server.received_requests().await.unwrap_or_default().len()
    }

    #[test]
    fn test_attribution_format() {
        let photo: Photo = serde_json::from_value(json!({
            "urls": { "regular": "https://img" },
            "user": { "name": "Ada", "links": { "html": "https://unsplash.com/@ada" } }
        }))
        .unwrap();

        assert_eq!(
            attribution(&photo),
            "Photo by <a href=\"https://unsplash.com/@ada?utm_source=mega-dash&utm_medium=referral\">Ada</a> \
             / <a href=\"https://unsplash.com/?utm_source=mega-dash&utm_medium=referral\">Unsplash</a>"
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[tokio::test]
    async fn test_resolve_builds_background_and_tracks_download() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/photos/random"))
            .and(query_param("query", "sunny weather"))
            .and(query_param("orientation", "landscape"))
            .and(query_param("content_filter", "high"))
            .and(query_param("count", "1"))
            .and(header("Authorization", "Client-ID test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-ratelimit-remaining", "42")
                    .set_body_json(photo_body(&mock_server)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/photos/abc/download"))
            .and(header("Authorization", "Client-ID test-key"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let guard = RateLimitGuard::default();
        let client = client_for(&mock_server, Some("test-key"));
        let bg = client.resolve("sunny weather", &guard).await.unwrap();

        assert_eq!(bg.url, "https://images.example/sunny.jpg");
        assert!(bg.attribution.contains("Ada Lovelace"));
        assert!(bg.attribution.contains("https://unsplash.com/@ada?utm_source=mega-dash"));
        assert_eq!(guard.remaining(), Some(42));

        assert_eq!(wait_for_requests(&mock_server, 2).await, 2);
        mock_server.verify().await;
    }

    #[tokio::test]
    async fn test_resolve_accepts_single_object() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/photos/random"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "urls": { "regular": "https://images.example/one.jpg" },
                "user": { "name": "Bo", "links": { "html": "https://unsplash.com/@bo" } }
            })))
            .mount(&mock_server)
            .await;

        let guard = RateLimitGuard::default();
        let bg = client_for(&mock_server, Some("k"))
            .resolve("Fog", &guard)
            .await
            .unwrap();

        assert_eq!(bg.url, "https://images.example/one.jpg");
        // No header on the response: headroom falls back to the healthy default
        assert_eq!(guard.remaining(), Some(50));
    }

    #[tokio::test]
    async fn test_resolve_without_key_makes_no_request() {
        let mock_server = MockServer::start().await;

        let result = client_for(&mock_server, None)
            .resolve("Fog", &RateLimitGuard::default())
            .await;

        assert!(matches!(result, Err(ApiError::MissingCredential)));
        assert_eq!(wait_for_requests(&mock_server, 0).await, 0);
    }

    #[tokio::test]
    async fn test_empty_key_counts_as_missing() {
        let client = UnsplashClient::new(Client::new(), UNSPLASH_API_BASE, Some(String::new()));
        assert!(!client.has_credential());
    }

    #[tokio::test]
    async fn test_upstream_status_forwarded_and_headroom_recorded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/photos/random"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("x-ratelimit-remaining", "0")
                    .set_body_string("Rate Limit Exceeded"),
            )
            .mount(&mock_server)
            .await;

        let guard = RateLimitGuard::default();
        let result = client_for(&mock_server, Some("k")).resolve("Fog", &guard).await;

        match result {
            Err(ApiError::Upstream { status, message }) => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(message, IMAGE_ERROR_MESSAGE);
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
        assert_eq!(guard.remaining(), Some(0));
        assert!(!guard.can_call());
    }

    #[tokio::test]
    async fn test_malformed_body_is_internal() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/photos/random"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server, Some("k"))
            .resolve("Fog", &RateLimitGuard::default())
            .await;
        assert!(matches!(result, Err(ApiError::Internal(_))));
    }

    #[tokio::test]
    async fn test_tracking_failure_is_swallowed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/photos/random"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "urls": { "regular": "https://images.example/x.jpg" },
                "user": { "name": "Cy", "links": { "html": "https://unsplash.com/@cy" } },
                "links": { "download_location": "http://127.0.0.1:1/unreachable" }
            })))
            .mount(&mock_server)
            .await;

        let bg = client_for(&mock_server, Some("k"))
            .resolve("Snow", &RateLimitGuard::default())
            .await
            .unwrap();
        assert_eq!(bg.url, "https://images.example/x.jpg");
    }

    #[tokio::test]
    async fn test_photo_url() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/photos/random"))
            .and(query_param("query", "mountains"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "urls": { "regular": "https://images.example/m.jpg" },
                "user": { "name": "Di", "links": { "html": "https://unsplash.com/@di" } }
            })))
            .mount(&mock_server)
            .await;

        let url = client_for(&mock_server, Some("k"))
            .photo_url("mountains", &RateLimitGuard::default())
            .await
            .unwrap();
        assert_eq!(url, "https://images.example/m.jpg");
    }
}
