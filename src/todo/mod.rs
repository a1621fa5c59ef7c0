//! To-do item service
//!
//! Plain CRUD over a single `todos` table, with partial updates that only
//! touch the fields a request actually carries.

pub mod api_doc;
pub mod database;
pub mod handler;
pub mod model;
pub mod patch;
pub mod route;

use crate::config::ServiceDefaults;

pub const DEFAULTS: ServiceDefaults = ServiceDefaults {
    name: "todo-service",
    port: 8081,
    database_path: "data/todos.db",
};
