//! HTTP request handlers for the to-do API

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::error::{ApiError, ErrorResponse};
use crate::todo::api_doc::DOCS_PATH;
use crate::todo::database::AppState;
use crate::todo::model::{NewTodo, TodoItem};
use crate::todo::patch::TodoPatch;

fn require_title(title: &str) -> Result<(), ApiError> {
    if title.is_empty() {
        return Err(ApiError::invalid("title must not be empty"));
    }
    Ok(())
}

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
        "message": "ToDo Service API",
        "version": env!("CARGO_PKG_VERSION"),
        "docs": DOCS_PATH,
    }))
}

/// Creates a new item
///
/// # Request Body
///
/// ```json
/// { "title": "Buy milk", "description": null, "completed": false }
/// ```
///
/// Only `title` is required; it must not be empty.
///
/// # Response
///
/// - **201 Created** - the stored item
/// - **4xx** - malformed body or empty title
#[utoipa::path(
    post,
    path = "/items",
    request_body = NewTodo,
    responses(
        (status = 201, description = "Item created", body = TodoItem),
        (status = 422, description = "Missing or empty title", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<NewTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoItem>), ApiError> {
    let Json(new) = payload?;
    require_title(&new.title)?;

    let item = state.store.insert(&new)?;
    tracing::info!(id = item.id, "created todo item");

    Ok((StatusCode::CREATED, Json(item)))
}

/// Lists every item, ascending by id
#[utoipa::path(
    get,
    path = "/items",
    responses(
        (status = 200, description = "All items, ascending by id", body = Vec<TodoItem>)
    ),
    tag = "items"
)]
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<TodoItem>>, ApiError> {
    Ok(Json(state.store.select_all()?))
}

#[utoipa::path(
    get,
    path = "/items/{id}",
    params(
        ("id" = u64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "The item", body = TodoItem),
        (status = 404, description = "Unknown id", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn get_item(
    id: Result<Path<u64>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<TodoItem>, ApiError> {
    let Path(id) = id?;

    let item = state
        .store
        .select_by_id(id)?
        .ok_or(ApiError::NotFound("Item"))?;

    Ok(Json(item))
}

/// Partially updates an item
///
/// Only fields present in the body are changed; see `TodoPatch` for how
/// absent and `null` values are told apart. A body that changes nothing
/// returns the item as stored without writing.
///
/// # Response
///
/// - **200 OK** - the item after the update
/// - **404 Not Found** - unknown id
/// - **4xx** - malformed body or empty title
#[utoipa::path(
    put,
    path = "/items/{id}",
    params(
        ("id" = u64, Path, description = "Item id")
    ),
    request_body = TodoPatch,
    responses(
        (status = 200, description = "The item after the update", body = TodoItem),
        (status = 404, description = "Unknown id", body = ErrorResponse),
        (status = 422, description = "Empty title", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn update_item(
    id: Result<Path<u64>, PathRejection>,
    State(state): State<AppState>,
    payload: Result<Json<TodoPatch>, JsonRejection>,
) -> Result<Json<TodoItem>, ApiError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    if let Some(title) = &patch.title {
        require_title(title)?;
    }

    let merged = state
        .store
        .update_fields(id, &patch)?
        .ok_or(ApiError::NotFound("Item"))?;

    if merged.written {
        tracing::info!(id, "updated todo item");
    } else {
        tracing::debug!(id, "update left todo item unchanged");
    }

    Ok(Json(merged.item))
}

/// Deletes an item; **204 No Content** on success, **404** if unknown
#[utoipa::path(
    delete,
    path = "/items/{id}",
    params(
        ("id" = u64, Path, description = "Item id")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Unknown id", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn delete_item(
    id: Result<Path<u64>, PathRejection>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;

    if !state.store.delete_by_id(id)? {
        return Err(ApiError::NotFound("Item"));
    }

    tracing::info!(id, "deleted todo item");
    Ok(StatusCode::NO_CONTENT)
}
