//! Queue Up Daemon - Main Entry Point

mod config;
mod logging;
mod telemetry;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::config::DaemonConfig;
use queueup_api_rpc::RpcServer;
use queueup_core::application::QueueService;
use queueup_core::port::id_provider::UuidProvider;
use queueup_core::port::time_provider::SystemTimeProvider;
use queueup_infra_memory::MemoryStore;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration (fail fast on bad values)
    let config = DaemonConfig::load().context("Invalid configuration")?;

    // 2. Initialize logging (+ optional OpenTelemetry)
    let _log_guard = logging::init(&config)?;

    info!(
        host = %config.host,
        port = config.port,
        log_format = ?config.log_format,
        "Queue Up daemon v{} starting...",
        VERSION
    );

    // 3. Open the store
    let store = MemoryStore::open();

    // 4. Setup dependencies (DI wiring)
    let service = Arc::new(QueueService::new(
        store.queues(),
        store.players(),
        Arc::new(UuidProvider),
        Arc::new(SystemTimeProvider),
    ));

    // 5. Start JSON-RPC server
    let started = RpcServer::new(config.rpc_server_config(), service)
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!(addr = %started.local_addr, "System ready");
    info!("Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown: drain the server before dropping state
    started
        .handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    started.handle.stopped().await;
    store.close().await;

    info!("Shutdown complete.");
    telemetry::shutdown();

    Ok(())
}
