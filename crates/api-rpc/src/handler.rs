//! RPC Method Handlers
//!
//! Translates JSON-RPC parameters into QueueService calls.

use crate::error::{throttled, to_rpc_error};
use crate::rate_limiter::RateLimiter;
use crate::types::{
    CreateQueueRequest, FinishMatchRequest, PlayerListResponse, PlayerResponse,
    QueuePlayerRequest, QueueRequest, QueueResponse, RegisterPlayerRequest, ReorderRequest,
    RotateRequest, SetModeRequest, StatsResponse,
};
use jsonrpsee::types::ErrorObjectOwned;
use queueup_core::application::QueueService;
use queueup_core::domain::QueueMode;
use queueup_core::error::AppError;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

type RpcResult<T> = Result<T, ErrorObjectOwned>;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    service: Arc<QueueService>,
    rate_limiter: RateLimiter,
    start_time: Instant,
}

impl RpcHandler {
    pub fn new(service: Arc<QueueService>, rate_limiter: RateLimiter) -> Self {
        Self {
            service,
            rate_limiter,
            start_time: Instant::now(),
        }
    }

    /// Rate limiting check for mutating methods
    fn admit(&self, method: &str) -> RpcResult<()> {
        if self.rate_limiter.try_acquire() {
            Ok(())
        } else {
            warn!(method, "Request throttled");
            Err(throttled())
        }
    }

    /// queue.create.v1
    pub async fn create_queue(&self, params: CreateQueueRequest) -> RpcResult<QueueResponse> {
        self.admit("queue.create.v1")?;
        let mode = parse_mode(&params.mode)?;

        let queue = self
            .service
            .create_queue(mode)
            .await
            .map_err(to_rpc_error)?;
        Ok(queue.into())
    }

    /// queue.get.v1
    pub async fn get_queue(&self, params: QueueRequest) -> RpcResult<QueueResponse> {
        let queue = self
            .service
            .get_queue(&params.queue_id)
            .await
            .map_err(to_rpc_error)?;
        Ok(queue.into())
    }

    /// queue.latest.v1
    pub async fn latest_queue(&self) -> RpcResult<QueueResponse> {
        let queue = self.service.latest_queue().await.map_err(to_rpc_error)?;
        Ok(queue.into())
    }

    /// player.register.v1
    pub async fn register_player(
        &self,
        params: RegisterPlayerRequest,
    ) -> RpcResult<PlayerResponse> {
        self.admit("player.register.v1")?;

        let player = self
            .service
            .register_player(&params.name)
            .await
            .map_err(to_rpc_error)?;
        Ok(player.into())
    }

    /// player.list.v1
    pub async fn list_players(&self) -> RpcResult<PlayerListResponse> {
        let players = self.service.list_players().await.map_err(to_rpc_error)?;
        Ok(PlayerListResponse {
            players: players.into_iter().map(PlayerResponse::from).collect(),
        })
    }

    /// queue.enqueue.v1
    pub async fn enqueue_player(&self, params: QueuePlayerRequest) -> RpcResult<QueueResponse> {
        self.admit("queue.enqueue.v1")?;

        let queue = self
            .service
            .enqueue_player(&params.queue_id, &params.player_id)
            .await
            .map_err(to_rpc_error)?;
        Ok(queue.into())
    }

    /// queue.dequeue.v1
    pub async fn dequeue_player(&self, params: QueuePlayerRequest) -> RpcResult<QueueResponse> {
        self.admit("queue.dequeue.v1")?;

        let queue = self
            .service
            .dequeue_player(&params.queue_id, &params.player_id)
            .await
            .map_err(to_rpc_error)?;
        Ok(queue.into())
    }

    /// queue.set_mode.v1
    pub async fn set_mode(&self, params: SetModeRequest) -> RpcResult<QueueResponse> {
        self.admit("queue.set_mode.v1")?;
        let mode = parse_mode(&params.mode)?;

        let queue = self
            .service
            .set_mode(&params.queue_id, mode)
            .await
            .map_err(to_rpc_error)?;
        Ok(queue.into())
    }

    /// queue.reorder.v1
    pub async fn reorder_queue(&self, params: ReorderRequest) -> RpcResult<QueueResponse> {
        self.admit("queue.reorder.v1")?;

        let queue = self
            .service
            .reorder_queue(&params.queue_id, params.player_ids)
            .await
            .map_err(to_rpc_error)?;
        Ok(queue.into())
    }

    /// queue.rotate.v1
    pub async fn rotate_after_match(&self, params: RotateRequest) -> RpcResult<QueueResponse> {
        self.admit("queue.rotate.v1")?;

        let queue = self
            .service
            .rotate_after_match(
                &params.queue_id,
                params.losing_player_ids.into_iter().collect(),
            )
            .await
            .map_err(to_rpc_error)?;
        Ok(queue.into())
    }

    /// queue.finish_match.v1
    pub async fn finish_match(&self, params: FinishMatchRequest) -> RpcResult<QueueResponse> {
        self.admit("queue.finish_match.v1")?;

        let queue = self
            .service
            .finish_match(
                &params.queue_id,
                params.winning_player_ids.into_iter().collect(),
            )
            .await
            .map_err(to_rpc_error)?;
        Ok(queue.into())
    }

    /// queue.randomize.v1
    pub async fn randomize_queue(&self, params: QueueRequest) -> RpcResult<QueueResponse> {
        self.admit("queue.randomize.v1")?;

        let queue = self
            .service
            .randomize_queue(&params.queue_id)
            .await
            .map_err(to_rpc_error)?;
        Ok(queue.into())
    }

    /// admin.stats.v1
    pub async fn stats(&self) -> RpcResult<StatsResponse> {
        let stats = self.service.stats().await.map_err(to_rpc_error)?;
        Ok(StatsResponse::new(
            stats,
            self.start_time.elapsed().as_secs() as i64,
        ))
    }
}

fn parse_mode(raw: &str) -> RpcResult<QueueMode> {
    raw.parse::<QueueMode>()
        .map_err(|e| to_rpc_error(AppError::Domain(e)))
}
