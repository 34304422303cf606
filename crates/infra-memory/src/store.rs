// Store lifecycle: opened on process start, torn down on shutdown

use crate::{InMemoryPlayerRepository, InMemoryQueueRepository};
use std::sync::Arc;
use tracing::info;

/// Process-wide in-memory store holding both repositories
pub struct MemoryStore {
    queues: Arc<InMemoryQueueRepository>,
    players: Arc<InMemoryPlayerRepository>,
}

impl MemoryStore {
    pub fn open() -> Self {
        info!("In-memory store opened (no durability)");
        Self {
            queues: Arc::new(InMemoryQueueRepository::new()),
            players: Arc::new(InMemoryPlayerRepository::new()),
        }
    }

    pub fn queues(&self) -> Arc<InMemoryQueueRepository> {
        self.queues.clone()
    }

    pub fn players(&self) -> Arc<InMemoryPlayerRepository> {
        self.players.clone()
    }

    /// Tear down the store, dropping all state
    pub async fn close(self) {
        let queues = self.queues.clear().await;
        let players = self.players.clear().await;
        info!(
            dropped_queues = queues,
            dropped_players = players,
            "In-memory store closed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use queueup_core::domain::{Player, PlayerName, Queue, QueueMode};
    use queueup_core::port::{PlayerRepository, QueueRepository};

    #[tokio::test]
    async fn test_handles_share_state() {
        let store = MemoryStore::open();

        store
            .queues()
            .insert(&Queue::new("q-1", 1, QueueMode::Singles))
            .await
            .unwrap();
        store
            .players()
            .insert(&Player::new("p-1", PlayerName::parse("Ada").unwrap()))
            .await
            .unwrap();

        assert_eq!(store.queues().count().await.unwrap(), 1);
        assert_eq!(store.players().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_close_drops_state_seen_by_other_handles() {
        let store = MemoryStore::open();
        let queues = store.queues();
        queues
            .insert(&Queue::new("q-1", 1, QueueMode::Singles))
            .await
            .unwrap();

        store.close().await;

        assert_eq!(queues.count().await.unwrap(), 0);
    }
}
