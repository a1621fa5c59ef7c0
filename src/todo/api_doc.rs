use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::todo::handler;
use crate::todo::model::{NewTodo, TodoItem};
use crate::todo::patch::TodoPatch;

/// Swagger UI mount point
pub const DOCS_PATH: &str = "/docs";

/// Raw OpenAPI document
pub const OPENAPI_PATH: &str = "/openapi.json";

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ToDo Service",
        description = "To-do items with partial updates"
    ),
    paths(
        handler::service_info,
        handler::create_item,
        handler::list_items,
        handler::get_item,
        handler::update_item,
        handler::delete_item
    ),
    components(
        schemas(TodoItem, NewTodo, TodoPatch, ErrorResponse)
    ),
    tags(
        (name = "service", description = "Service metadata"),
        (name = "items", description = "To-do item operations")
    )
)]
pub struct ApiDoc;
