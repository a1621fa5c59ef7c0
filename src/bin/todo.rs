//! To-do service entry point
//!
//! # Environment Variables
//!
//! - `HOST` / `PORT` - Listen address (default: 0.0.0.0:8081)
//! - `DATABASE_URL` - Path to the database file (default: "data/todos.db")
//! - `RUST_LOG` - Log filter

use anyhow::Context;
use dotenvy::dotenv;

use mini_services::config::Config;
use mini_services::todo::{self, database::init_db, database::AppState, route::create_app};
use mini_services::{server, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    telemetry::init_tracing("mini_services=debug,todo_service=debug,tower_http=debug");

    let config = Config::from_env(&todo::DEFAULTS)?;
    config.log_startup();

    let store = init_db(&config.database_path).with_context(|| {
        format!(
            "failed to initialize database at {}",
            config.database_path.display()
        )
    })?;

    server::serve(create_app(AppState { store }), &config).await
}
