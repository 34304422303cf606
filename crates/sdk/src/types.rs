//! SDK Request/Response Types
//!
//! Mirrors the JSON-RPC types from the api-rpc crate.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateQueueRequest<'a> {
    pub mode: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct QueueRequest<'a> {
    pub queue_id: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct QueuePlayerRequest<'a> {
    pub queue_id: &'a str,
    pub player_id: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SetModeRequest<'a> {
    pub queue_id: &'a str,
    pub mode: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ReorderRequest<'a> {
    pub queue_id: &'a str,
    pub player_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RotateRequest<'a> {
    pub queue_id: &'a str,
    pub losing_player_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct FinishMatchRequest<'a> {
    pub queue_id: &'a str,
    pub winning_player_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RegisterPlayerRequest<'a> {
    pub name: &'a str,
}

/// Registered player
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PlayerList {
    pub players: Vec<Player>,
}

/// Queue as returned by every queue.* method
#[derive(Debug, Clone, Deserialize)]
pub struct Queue {
    pub id: String,
    pub queue_mode: String,
    pub match_size: usize,
    pub players: Vec<Player>,
    pub match_started_at: Option<i64>,
    pub created_at: i64,
}

impl Queue {
    /// Players in the active match
    pub fn current_match(&self) -> &[Player] {
        &self.players[..self.match_size.min(self.players.len())]
    }

    /// Players waiting behind the match
    pub fn waiting(&self) -> &[Player] {
        &self.players[self.match_size.min(self.players.len())..]
    }

    pub fn player_ids(&self) -> Vec<String> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }
}

/// Daemon statistics
#[derive(Debug, Clone, Deserialize)]
pub struct Stats {
    pub queue_count: i64,
    pub player_count: i64,
    pub uptime_seconds: i64,
}
