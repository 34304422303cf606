//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results.

use queueup_core::application::ServiceStats;
use queueup_core::domain::{Player, Queue};
use serde::{Deserialize, Serialize};

/// queue.create.v1 - Create an empty queue
#[derive(Debug, Deserialize)]
pub struct CreateQueueRequest {
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_mode() -> String {
    "singles".to_string()
}

/// queue.get.v1 / queue.randomize.v1
#[derive(Debug, Deserialize)]
pub struct QueueRequest {
    pub queue_id: String,
}

/// queue.enqueue.v1 / queue.dequeue.v1
#[derive(Debug, Deserialize)]
pub struct QueuePlayerRequest {
    pub queue_id: String,
    pub player_id: String,
}

/// queue.set_mode.v1
#[derive(Debug, Deserialize)]
pub struct SetModeRequest {
    pub queue_id: String,
    pub mode: String,
}

/// queue.reorder.v1
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub queue_id: String,
    #[serde(default)]
    pub player_ids: Vec<String>,
}

/// queue.rotate.v1 - Move the losers of the finished match to the back
#[derive(Debug, Deserialize)]
pub struct RotateRequest {
    pub queue_id: String,
    #[serde(default)]
    pub losing_player_ids: Vec<String>,
}

/// queue.finish_match.v1 - Declare the winning side of the current match
#[derive(Debug, Deserialize)]
pub struct FinishMatchRequest {
    pub queue_id: String,
    pub winning_player_ids: Vec<String>,
}

/// player.register.v1
#[derive(Debug, Deserialize)]
pub struct RegisterPlayerRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerResponse {
    pub id: String,
    pub name: String,
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            name: player.name,
        }
    }
}

/// player.list.v1
#[derive(Debug, Clone, Serialize)]
pub struct PlayerListResponse {
    pub players: Vec<PlayerResponse>,
}

/// Queue result shared by every queue.* method
#[derive(Debug, Clone, Serialize)]
pub struct QueueResponse {
    pub id: String,
    pub queue_mode: String,
    pub match_size: usize,
    pub players: Vec<PlayerResponse>,
    pub match_started_at: Option<i64>,
    pub created_at: i64,
}

impl From<Queue> for QueueResponse {
    fn from(queue: Queue) -> Self {
        Self {
            match_size: queue.match_size(),
            queue_mode: queue.queue_mode.to_string(),
            id: queue.id,
            players: queue.players.into_iter().map(PlayerResponse::from).collect(),
            match_started_at: queue.match_started_at,
            created_at: queue.created_at,
        }
    }
}

/// admin.stats.v1 - Get store statistics
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub queue_count: i64,
    pub player_count: i64,
    pub uptime_seconds: i64,
}

impl StatsResponse {
    pub fn new(stats: ServiceStats, uptime_seconds: i64) -> Self {
        Self {
            queue_count: stats.queue_count,
            player_count: stats.player_count,
            uptime_seconds,
        }
    }
}
