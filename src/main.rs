//! Salesboard Server
//!
//! Run with: cargo run --bin salesboard [-- path/to/config.toml]
//!
//! Without an argument the config is looked up in the default locations.
//! `SALESBOARD_*` environment variables override file settings and
//! `RUST_LOG` overrides the log level.

use anyhow::Context;
use salesboard::config::Config;
use salesboard::notify::TracingNotifier;
use salesboard::session::SessionContext;
use salesboard::web::{serve, AppState};
use salesboard::widgets::DataSources;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => Config::load_with_env(&path)?,
        None => Config::load_default(),
    };
    config.logging.init();

    tracing::info!("Starting Salesboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Metrics API: {}", config.remote.base_url);
    tracing::info!("Table backend: {:?}", config.store.backend);

    let notifier = Arc::new(TracingNotifier);
    let sources = DataSources::from_config(&config, notifier.clone())
        .context("Failed to set up data sources")?;
    let session = SessionContext::from_config(&config.session, notifier);
    if let Some(username) = session.username() {
        tracing::info!("Restored session for {}", username);
    }

    let state = AppState::new(Arc::new(sources), session);
    serve(state, &config.server).await?;

    tracing::info!("Salesboard stopped");
    Ok(())
}
