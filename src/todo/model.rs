//! Data models for the to-do service

use serde::{Deserialize, Serialize};

/// A to-do item as stored and returned by the API
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, utoipa::ToSchema)]
pub struct TodoItem {
    /// Storage-assigned, never reused after a delete
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

/// Request payload for `POST /items`
///
/// # Example
/// ```json
/// { "title": "Buy milk", "description": "2 litres" }
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, utoipa::ToSchema)]
pub struct NewTodo {
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Defaults to `false` when omitted
    #[serde(default)]
    pub completed: bool,
}
