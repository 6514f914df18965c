//! shelfmark gateway entry point.
//!
//! Boots the HTTP server: loads layered configuration, constructs the cache
//! store and upstream clients once, starts the background cache sweeper, and
//! serves the search and image-proxy routes.

use anyhow::Result;
use shelfmark_core::{AppConfig, sweep_interval};
use tracing_subscriber::EnvFilter;

mod error;
mod handlers;
mod state;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load()?;
    let state = state::AppState::from_config(&config)?;

    state.cache.clone().spawn_sweeper(sweep_interval(state.search_ttl));

    let app = handlers::router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "shelfmark gateway listening");
    axum::serve(listener, app).await?;

    Ok(())
}
