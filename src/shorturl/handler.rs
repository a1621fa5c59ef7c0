//! HTTP request handlers for the URL shortener API
//!
//! - `POST /shorten` allocates a short ID and stores the link
//! - `GET /{short_id}` redirects to the stored URL
//! - `GET /stats/{short_id}` reports what a short ID points to

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::json;

use crate::error::{ApiError, ErrorResponse};
use crate::shorturl::api_doc::DOCS_PATH;
use crate::shorturl::model::{LinkStats, ShortenRequest, ShortenResponse};
use crate::shorturl::short_id::allocate;
use crate::shorturl::state::AppState;

/// Bytes escaped in a `Location` header. Non-ASCII is always escaped too.
const LOCATION: &AsciiSet = &CONTROLS.add(b' ');

/// Service descriptor for `GET /`
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service name, version and docs location")
    ),
    tag = "service"
)]
pub async fn service_info() -> impl IntoResponse {
    Json(json!({
        "message": "URL Shortener Service API",
        "version": env!("CARGO_PKG_VERSION"),
        "docs": DOCS_PATH,
    }))
}

/// Creates a new short link
///
/// The body is validated before the store is touched. A fresh short ID is
/// checked against the store until an unused one turns up (bounded, see
/// `short_id::MAX_ATTEMPTS`), then the link is inserted.
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/very/long/url" }
/// ```
///
/// # Response
///
/// - **201 Created** - `{short_id, short_url, full_url}`
/// - **4xx** - missing or malformed `url`
/// - **500 Internal Server Error** - no unused short ID could be found
#[utoipa::path(
    post,
    path = "/shorten",
    request_body = ShortenRequest,
    responses(
        (status = 201, description = "Short link created", body = ShortenResponse),
        (status = 422, description = "Missing or invalid url", body = ErrorResponse),
        (status = 500, description = "No unused short ID or storage failure", body = ErrorResponse)
    ),
    tag = "links"
)]
pub async fn shorten_url(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), ApiError> {
    let Json(payload) = payload?;

    let short_id = allocate(|candidate| state.store.short_id_exists(candidate))?;
    let link = state.store.insert(&short_id, &payload.url)?;

    tracing::info!(id = link.id, short_id = %link.short_id, "created short link");

    let response = ShortenResponse {
        short_url: state.short_url(&link.short_id),
        short_id: link.short_id,
        full_url: link.full_url,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Turns a stored URL into a valid `Location` header value
///
/// Stored URLs are arbitrary text. Control characters, spaces and non-ASCII
/// are percent-encoded; existing `%XX` escapes are left untouched.
pub fn location_for(full_url: &str) -> String {
    utf8_percent_encode(full_url, LOCATION).to_string()
}

/// Redirects a short ID to its stored URL
///
/// # Response
///
/// - **307 Temporary Redirect** - `Location` is the stored URL
/// - **404 Not Found** - unknown short ID
#[utoipa::path(
    get,
    path = "/{short_id}",
    params(
        ("short_id" = String, Path, description = "6-character short ID")
    ),
    responses(
        (status = 307, description = "Redirect to the stored URL"),
        (status = 404, description = "Unknown short ID", body = ErrorResponse)
    ),
    tag = "links"
)]
pub async fn redirect_url(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, ApiError> {
    let link = state
        .store
        .select_by_short_id(&short_id)?
        .ok_or(ApiError::NotFound("URL"))?;

    Ok(Redirect::temporary(&location_for(&link.full_url)))
}

/// Returns the stored URL for a short ID without redirecting
#[utoipa::path(
    get,
    path = "/stats/{short_id}",
    params(
        ("short_id" = String, Path, description = "6-character short ID")
    ),
    responses(
        (status = 200, description = "Stored URL for the short ID", body = LinkStats),
        (status = 404, description = "Unknown short ID", body = ErrorResponse)
    ),
    tag = "links"
)]
pub async fn url_stats(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkStats>, ApiError> {
    let link = state
        .store
        .select_by_short_id(&short_id)?
        .ok_or(ApiError::NotFound("URL"))?;

    Ok(Json(link.into()))
}

/// Answers `GET` on reserved single-segment paths (`/stats`, `/shorten`)
///
/// These words can never be short IDs, so they get their own routes instead
/// of falling through to `redirect_url`.
pub async fn reserved_path() -> ApiError {
    ApiError::NotFound("URL")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_leaves_plain_urls_alone() {
        let url = "https://example.com/path?q=1&r=a%20b#frag";
        assert_eq!(location_for(url), url);
    }

    #[test]
    fn test_location_escapes_header_breaking_bytes() {
        assert_eq!(
            location_for("https://example.com/a\nb c\u{7f}"),
            "https://example.com/a%0Ab%20c%7F"
        );
        assert_eq!(location_for("https://例.jp/"), "https://%E4%BE%8B.jp/");
    }
}
