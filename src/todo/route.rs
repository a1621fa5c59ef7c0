use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::todo::api_doc::{ApiDoc, DOCS_PATH, OPENAPI_PATH};
use crate::todo::database::AppState;
use crate::todo::handler::{
    create_item, delete_item, get_item, list_items, service_info, update_item,
};

/// Creates the router for the to-do service
///
/// - `GET /` - Service descriptor
/// - `GET|POST /items` - List / create
/// - `GET|PUT|DELETE /items/{id}` - Read / partial update / delete
/// - `GET /docs` - Swagger UI, backed by `GET /openapi.json`
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .with_state(state)
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
}
