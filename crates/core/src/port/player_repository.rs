// Player Repository Port (Interface)

use crate::domain::{Player, PlayerId};
use crate::error::Result;
use async_trait::async_trait;

/// Registry of players by ID
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Insert a newly registered player
    async fn insert(&self, player: &Player) -> Result<()>;

    /// Find player by ID
    async fn find_by_id(&self, id: &PlayerId) -> Result<Option<Player>>;

    /// All players in registration order
    async fn list(&self) -> Result<Vec<Player>>;

    /// Number of registered players
    async fn count(&self) -> Result<i64>;
}
