//! CashDesk REST service
//!
//! Thin transport over the domain core: routing, payload shaping and
//! error-to-status mapping live here; all business semantics live in
//! `desk-core`.

mod config;
mod error;
mod routes;
mod state;

use config::ServiceConfig;
use desk_core::{Config, Storage};
use state::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting CashDesk API");

    let service_config = ServiceConfig::load()?;
    let storage_config = Config {
        data_dir: service_config.data_dir.clone(),
        ..Config::default()
    };

    let storage = Storage::open(&storage_config)?;
    let app = routes::router(AppState::new(storage))
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&service_config.listen_addr).await?;
    info!("Listening on {}", service_config.listen_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
