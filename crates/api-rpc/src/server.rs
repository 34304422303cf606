//! JSON-RPC Server
//!
//! Serves the queue API as JSON-RPC 2.0 over HTTP.

use crate::handler::RpcHandler;
use crate::rate_limiter::RateLimiter;
use crate::types::{
    CreateQueueRequest, FinishMatchRequest, QueuePlayerRequest, QueueRequest,
    RegisterPlayerRequest, ReorderRequest, RotateRequest, SetModeRequest,
};
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use queueup_core::application::QueueService;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_RPC_HOST: &str = "127.0.0.1";
pub const DEFAULT_RPC_PORT: u16 = 9530;
pub const DEFAULT_RATE_LIMIT_BURST: u32 = 200;
pub const DEFAULT_RATE_LIMIT_RATE: u32 = 100;

/// RPC Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
    pub rate_limit_burst: u32,
    pub rate_limit_rate: u32, // tokens per second
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
            rate_limit_burst: DEFAULT_RATE_LIMIT_BURST,
            rate_limit_rate: DEFAULT_RATE_LIMIT_RATE,
        }
    }
}

/// A running server and the address it actually bound (port 0 resolves here)
pub struct StartedServer {
    pub local_addr: SocketAddr,
    pub handle: ServerHandle,
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, service: Arc<QueueService>) -> Self {
        let rate_limiter = RateLimiter::new(config.rate_limit_burst, config.rate_limit_rate);
        Self {
            config,
            handler: Arc::new(RpcHandler::new(service, rate_limiter)),
        }
    }

    /// Start the JSON-RPC server
    pub async fn start(self) -> Result<StartedServer, String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            burst = self.config.rate_limit_burst,
            rate = self.config.rate_limit_rate,
            "Starting JSON-RPC server"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;

        let local_addr = server
            .local_addr()
            .map_err(|e| format!("Failed to read bound address: {}", e))?;

        let module = build_module(self.handler)?;

        info!(addr = %local_addr, "JSON-RPC server started successfully");

        let handle = server.start(module);
        Ok(StartedServer { local_addr, handle })
    }
}

/// Register every method on a module whose context is the shared handler
fn build_module(handler: Arc<RpcHandler>) -> Result<RpcModule<RpcHandler>, String> {
    let mut module = RpcModule::from_arc(handler);

    module.register_async_method("queue.create.v1", |params, handler, _| async move {
        let req: CreateQueueRequest = params.parse()?;
        handler.create_queue(req).await
    })
    .map_err(|e| e.to_string())?;

    module.register_async_method("queue.get.v1", |params, handler, _| async move {
        let req: QueueRequest = params.parse()?;
        handler.get_queue(req).await
    })
    .map_err(|e| e.to_string())?;

    module.register_async_method("queue.latest.v1", |_, handler, _| async move {
        handler.latest_queue().await
    })
    .map_err(|e| e.to_string())?;

    module.register_async_method("player.register.v1", |params, handler, _| async move {
        let req: RegisterPlayerRequest = params.parse()?;
        handler.register_player(req).await
    })
    .map_err(|e| e.to_string())?;

    module.register_async_method("player.list.v1", |_, handler, _| async move {
        handler.list_players().await
    })
    .map_err(|e| e.to_string())?;

    module.register_async_method("queue.enqueue.v1", |params, handler, _| async move {
        let req: QueuePlayerRequest = params.parse()?;
        handler.enqueue_player(req).await
    })
    .map_err(|e| e.to_string())?;

    module.register_async_method("queue.dequeue.v1", |params, handler, _| async move {
        let req: QueuePlayerRequest = params.parse()?;
        handler.dequeue_player(req).await
    })
    .map_err(|e| e.to_string())?;

    module.register_async_method("queue.set_mode.v1", |params, handler, _| async move {
        let req: SetModeRequest = params.parse()?;
        handler.set_mode(req).await
    })
    .map_err(|e| e.to_string())?;

    module.register_async_method("queue.reorder.v1", |params, handler, _| async move {
        let req: ReorderRequest = params.parse()?;
        handler.reorder_queue(req).await
    })
    .map_err(|e| e.to_string())?;

    module.register_async_method("queue.rotate.v1", |params, handler, _| async move {
        let req: RotateRequest = params.parse()?;
        handler.rotate_after_match(req).await
    })
    .map_err(|e| e.to_string())?;

    module.register_async_method("queue.finish_match.v1", |params, handler, _| async move {
        let req: FinishMatchRequest = params.parse()?;
        handler.finish_match(req).await
    })
    .map_err(|e| e.to_string())?;

    module.register_async_method("queue.randomize.v1", |params, handler, _| async move {
        let req: QueueRequest = params.parse()?;
        handler.randomize_queue(req).await
    })
    .map_err(|e| e.to_string())?;

    // Admin APIs
    module.register_async_method("admin.stats.v1", |_, handler, _| async move {
        handler.stats().await
    })
    .map_err(|e| e.to_string())?;

    Ok(module)
}
