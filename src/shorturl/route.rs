//! Route definitions for the URL shortener API

use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::shorturl::api_doc::{ApiDoc, DOCS_PATH, OPENAPI_PATH};
use crate::shorturl::handler::{redirect_url, reserved_path, service_info, shorten_url, url_stats};
use crate::shorturl::state::AppState;

/// Creates the router for the URL shortener
///
/// # Route Definitions
///
/// - `GET /` - Service descriptor
/// - `POST /shorten` - Creates a short link
/// - `GET /stats/{short_id}` - Looks a short link up
/// - `GET /{short_id}` - Redirects to the stored URL
/// - `GET /docs` - Swagger UI, backed by `GET /openapi.json`
///
/// Static segments take precedence over `/{short_id}` in the matcher, so the
/// literal paths (docs included) are all declared here. `GET /shorten` and
/// `GET /stats` are routed to `reserved_path` and answer 404 rather than 405
/// or a lookup.
///
/// # Example Usage
///
/// ```no_run
/// # use mini_services::shorturl::{database::init_db, route::create_app, state::AppState};
/// let store = init_db(std::path::Path::new("data/urls.db")).unwrap();
/// let app = create_app(AppState::new(store, None));
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/shorten", post(shorten_url).get(reserved_path))
        .route("/stats", get(reserved_path))
        .route("/stats/{short_id}", get(url_stats))
        .route("/{short_id}", get(redirect_url))
        .with_state(state)
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
}
