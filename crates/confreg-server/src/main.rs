//! Main entry point for the confreg server.
//!
//! Loads configuration, sets up logging and builds the registry state, then
//! runs until a shutdown signal arrives.

use anyhow::Context;
use tracing::info;

use confreg_server::model::Configuration;
use confreg_server::startup::{self, Registry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = Configuration::new()?;
    let _logging_guard = startup::init_logging(&configuration.logging_config())?;

    let registry = Registry::from_configuration(&configuration)?;
    registry
        .health_check()
        .await
        .with_context(|| format!("Storage backend '{}' is not available", registry.backend_name()))?;
    info!(backend = registry.backend_name(), "confreg server started");

    startup::wait_for_shutdown_signal().await;

    info!("confreg server stopped");
    Ok(())
}
