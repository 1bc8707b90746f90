//! Controller Registry Server Entry Point

use std::sync::Arc;

use clap::Parser;
use controller_registry::cli::Cli;
use controller_registry::service::RegistryService;
use controller_registry::store::InMemoryRecordStore;
use controller_registry::{logging, server, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    logging::init(&config.log_level)?;
    info!("Starting Controller Registry v{}", env!("CARGO_PKG_VERSION"));

    info!("Initializing in-memory storage...");
    let store = Arc::new(InMemoryRecordStore::new());
    let service = RegistryService::new(store);
    let state = AppState::new(service, config.request_timeout());

    server::run(state, &config.bind_addr()).await?;

    info!("Registry service shutdown completed");
    Ok(())
}
