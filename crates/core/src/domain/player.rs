// Player Domain Model

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Player ID (UUID v4)
pub type PlayerId = String;

/// Longest accepted display name, in characters
pub const MAX_PLAYER_NAME_LEN: usize = 64;

/// Validated display name (trimmed, non-empty, bounded)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn parse(raw: &str) -> Result<Self> {
        let name = raw.trim();

        if name.is_empty() {
            return Err(DomainError::InvalidPlayerName(
                "name cannot be empty".to_string(),
            ));
        }

        if name.chars().count() > MAX_PLAYER_NAME_LEN {
            return Err(DomainError::InvalidPlayerName(format!(
                "name too long (max {} characters)",
                MAX_PLAYER_NAME_LEN
            )));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Player Entity
///
/// Created once on registration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    /// Create a player from an injected ID and an already validated name
    pub fn new(id: impl Into<String>, name: PlayerName) -> Self {
        Self {
            id: id.into(),
            name: name.0,
        }
    }
}
