//! URL shortening service
//!
//! Hands out 6-character alphanumeric short IDs for arbitrary URLs, redirects
//! them, and reports what a short ID points to.

pub mod api_doc;
pub mod database;
pub mod handler;
pub mod model;
pub mod route;
pub mod short_id;
pub mod state;

use crate::config::ServiceDefaults;

pub const DEFAULTS: ServiceDefaults = ServiceDefaults {
    name: "shorturl-service",
    port: 8080,
    database_path: "data/urls.db",
};
