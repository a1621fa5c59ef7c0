//! Data models for the URL shortener
//!
//! `ShortLink` is what gets persisted; the rest are request/response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened URL as stored in the database
///
/// Links are write-once: nothing in the service updates or deletes them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ShortLink {
    /// Storage-assigned sequence number
    pub id: u64,

    /// Public 6-character identifier (e.g. "aZ3k9Q")
    pub short_id: String,

    /// The URL exactly as the caller supplied it
    pub full_url: String,

    pub created_at: DateTime<Utc>,
}

/// Request payload for `POST /shorten`
///
/// # Example
/// ```json
/// { "url": "https://example.com/very/long/url" }
/// ```
#[derive(Deserialize, Serialize, Debug, utoipa::ToSchema)]
pub struct ShortenRequest {
    pub url: String,
}

/// Response returned after creating a short link
///
/// `short_url` is relative (`/aZ3k9Q`) unless a public base URL is
/// configured.
#[derive(Serialize, Deserialize, Debug, utoipa::ToSchema)]
pub struct ShortenResponse {
    pub short_id: String,
    pub short_url: String,
    pub full_url: String,
}

/// Response for `GET /stats/{short_id}`
#[derive(Serialize, Deserialize, Debug, utoipa::ToSchema)]
pub struct LinkStats {
    pub short_id: String,
    pub full_url: String,
}

impl From<ShortLink> for LinkStats {
    fn from(link: ShortLink) -> Self {
        LinkStats {
            short_id: link.short_id,
            full_url: link.full_url,
        }
    }
}
