// In-Memory PlayerRepository Implementation

use async_trait::async_trait;
use queueup_core::domain::{Player, PlayerId};
use queueup_core::error::{AppError, Result};
use queueup_core::port::PlayerRepository;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    by_id: HashMap<PlayerId, Player>,
    order: Vec<PlayerId>, // registration order
}

#[derive(Default)]
pub struct InMemoryPlayerRepository {
    inner: RwLock<Inner>,
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every registered player, returning how many there were
    pub async fn clear(&self) -> usize {
        let mut inner = self.inner.write().await;
        let dropped = inner.order.len();
        inner.by_id.clear();
        inner.order.clear();
        dropped
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn insert(&self, player: &Player) -> Result<()> {
        let mut inner = self.inner.write().await;

        if inner.by_id.contains_key(&player.id) {
            return Err(AppError::Internal(format!(
                "Player {} already exists",
                player.id
            )));
        }

        inner.order.push(player.id.clone());
        inner.by_id.insert(player.id.clone(), player.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PlayerId) -> Result<Option<Player>> {
        let inner = self.inner.read().await;
        Ok(inner.by_id.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Player>> {
        let inner = self.inner.read().await;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.by_id.get(id).cloned())
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        let inner = self.inner.read().await;
        Ok(inner.order.len() as i64)
    }
}
