//! Download Tracking Task
//!
//! The photo API asks clients to ping a photo's download endpoint whenever the
//! photo is displayed. The ping is detached from the request that triggered
//! it: its outcome is logged and otherwise dropped.

use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use tokio::task::JoinHandle;
use tracing::debug;

/// Spawns the download-tracking notification for `location`.
///
/// # Arguments
/// * `client` - Shared HTTP client (cheap to clone)
/// * `location` - The photo's `download_location` URL
/// * `authorization` - Value for the `Authorization` header
///
/// # Returns
/// A JoinHandle the caller is free to drop; nothing on the response path
/// waits on it.
pub fn spawn_download_tracking(
    client: Client,
    location: String,
    authorization: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match client
            .get(&location)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                debug!(%location, "download tracked");
            }
            Ok(response) => {
                debug!(%location, status = %response.status(), "download tracking rejected");
            }
            Err(e) => {
                debug!(%location, "download tracking failed: {}", e);
            }
        }
    })
}
