//! Wire types for the photo API.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Photo {
    pub urls: PhotoUrls,
    pub user: Photographer,
    #[serde(default)]
    pub links: Option<PhotoLinks>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoUrls {
    pub regular: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Photographer {
    pub name: String,
    pub links: PhotographerLinks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotographerLinks {
    /// Public profile page
    pub html: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoLinks {
    /// Endpoint the API guidelines ask clients to hit when a photo is shown
    #[serde(default)]
    pub download_location: Option<String>,
}

impl Photo {
    pub fn download_location(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|l| l.download_location.as_deref())
    }
}

/// The random-photo endpoint answers with a single object, or with a list
/// when a `count` is requested.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PhotoPayload {
    Many(Vec<Photo>),
    One(Box<Photo>),
}

impl PhotoPayload {
    /// The first (or only) photo, if any.
    pub fn into_first(self) -> Option<Photo> {
        match self {
            PhotoPayload::Many(photos) => photos.into_iter().next(),
            PhotoPayload::One(photo) => Some(*photo),
        }
    }
}
