// Queue Domain Model

use crate::domain::error::DomainError;
use crate::domain::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Queue identifier
pub type QueueId = String;

/// Queue Mode (decides how many players form the active match)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueMode {
    #[default]
    Singles,
    Doubles,
}

impl QueueMode {
    /// Number of players at the front of the queue that form the match
    pub fn match_size(self) -> usize {
        match self {
            QueueMode::Singles => 2,
            QueueMode::Doubles => 4,
        }
    }
}

impl std::fmt::Display for QueueMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueMode::Singles => write!(f, "singles"),
            QueueMode::Doubles => write!(f, "doubles"),
        }
    }
}

impl FromStr for QueueMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "singles" => Ok(QueueMode::Singles),
            "doubles" => Ok(QueueMode::Doubles),
            _ => Err(DomainError::UnknownMode(s.to_string())),
        }
    }
}

/// Queue Entity
///
/// `players` is ordered by turn priority: the first `match_size()` entries are
/// the active match, everyone after them is waiting (index 0 plays next).
/// Player IDs are unique within a queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Queue {
    pub id: QueueId,
    pub queue_mode: QueueMode,
    pub players: Vec<Player>,

    /// When the current front-of-queue configuration began (epoch ms)
    pub match_started_at: Option<i64>,

    pub created_at: i64, // epoch ms
}

impl Queue {
    /// Create an empty queue
    ///
    /// # Arguments
    ///
    /// * `id` - Unique queue ID (injected, not generated)
    /// * `created_at` - Creation timestamp in epoch ms (injected, not system time)
    /// * `queue_mode` - Singles or doubles
    pub fn new(id: impl Into<String>, created_at: i64, queue_mode: QueueMode) -> Self {
        Self {
            id: id.into(),
            queue_mode,
            players: Vec::new(),
            match_started_at: None,
            created_at,
        }
    }

    pub fn match_size(&self) -> usize {
        self.queue_mode.match_size()
    }

    /// Players currently in the match (fewer than `match_size` when under-populated)
    pub fn current_match(&self) -> &[Player] {
        let end = self.match_size().min(self.players.len());
        &self.players[..end]
    }

    /// Players waiting behind the match, in priority order
    pub fn waiting(&self) -> &[Player] {
        let start = self.match_size().min(self.players.len());
        &self.players[start..]
    }

    pub fn has_full_match(&self) -> bool {
        self.players.len() >= self.match_size()
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }
}
