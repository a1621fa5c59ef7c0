//! Two small HTTP services over embedded redb stores
//!
//! - [`shorturl`]: URL shortener with collision-checked 6-character IDs
//! - [`todo`]: to-do items with presence-aware partial updates
//!
//! The remaining modules are shared plumbing used by both binaries.

pub mod config;
pub mod database;
pub mod error;
pub mod server;
pub mod shorturl;
pub mod telemetry;
pub mod todo;
