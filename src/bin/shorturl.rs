//! URL shortener entry point
//!
//! Loads configuration, opens the store (creating its directory and tables),
//! then serves until SIGINT/SIGTERM.
//!
//! # Environment Variables
//!
//! - `HOST` / `PORT` - Listen address (default: 0.0.0.0:8080)
//! - `DATABASE_URL` - Path to the database file (default: "data/urls.db")
//! - `PUBLIC_BASE_URL` - Optional prefix for returned short URLs
//! - `RUST_LOG` - Log filter

use anyhow::Context;
use dotenvy::dotenv;

use mini_services::config::Config;
use mini_services::shorturl::{self, database::init_db, route::create_app, state::AppState};
use mini_services::{server, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    telemetry::init_tracing("mini_services=debug,shorturl_service=debug,tower_http=debug");

    let config = Config::from_env(&shorturl::DEFAULTS)?;
    config.log_startup();

    let store = init_db(&config.database_path).with_context(|| {
        format!(
            "failed to initialize database at {}",
            config.database_path.display()
        )
    })?;

    let app = create_app(AppState::new(store, config.public_base_url.clone()));
    server::serve(app, &config).await
}
