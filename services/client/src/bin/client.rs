//! services/client/src/bin/client.rs

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use client_lib::{
    adapters::http::HttpJournalApi, config::Config, error::ClientError, shell::Shell,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded. Connecting to {}", config.api_base_url);

    // --- 2. Build the Backend Adapter ---
    let api = HttpJournalApi::new(
        &config.api_base_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;

    // --- 3. Run the Shell ---
    let today = Local::now().date_naive();
    let mut shell = Shell::new(Arc::new(api), today);
    shell.run().await
}
