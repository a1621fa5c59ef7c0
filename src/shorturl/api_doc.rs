use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::shorturl::handler;
use crate::shorturl::model::{LinkStats, ShortenRequest, ShortenResponse};

/// Swagger UI mount point
pub const DOCS_PATH: &str = "/docs";

/// Raw OpenAPI document
pub const OPENAPI_PATH: &str = "/openapi.json";

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "URL Shortener Service",
        description = "Shortens URLs to 6-character IDs and redirects them"
    ),
    paths(
        handler::service_info,
        handler::shorten_url,
        handler::url_stats,
        handler::redirect_url
    ),
    components(
        schemas(ShortenRequest, ShortenResponse, LinkStats, ErrorResponse)
    ),
    tags(
        (name = "service", description = "Service metadata"),
        (name = "links", description = "Short link operations")
    )
)]
pub struct ApiDoc;
