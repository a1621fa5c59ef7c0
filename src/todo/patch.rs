//! Partial updates for to-do items
//!
//! A `TodoPatch` remembers, per field, whether the request supplied it.
//! Merging applies exactly the supplied fields and keeps everything else, so
//! `{"completed": false}` un-completes an item and `{}` changes nothing.

use serde::{Deserialize, Deserializer, Serialize};

use crate::todo::model::TodoItem;

/// Request payload for `PUT /items/{id}`
///
/// - `title`, `completed`: absent or `null` leaves the stored value alone
/// - `description`: absent leaves it alone, `null` clears it
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, utoipa::ToSchema)]
pub struct TodoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Marks a field as supplied whenever its key appears, even with `null`.
/// Missing keys never reach this function and fall back to `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl TodoPatch {
    /// True when the request carried no field at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

/// Applies `patch` on top of `existing`
pub fn merge(existing: &TodoItem, patch: &TodoPatch) -> TodoItem {
    TodoItem {
        id: existing.id,
        title: patch
            .title
            .clone()
            .unwrap_or_else(|| existing.title.clone()),
        description: match &patch.description {
            Some(description) => description.clone(),
            None => existing.description.clone(),
        },
        completed: patch.completed.unwrap_or(existing.completed),
    }
}
