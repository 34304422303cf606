// Queue Service - request-level operations over stored queues and players
//
// Resolves IDs through the repositories, turns unknown IDs into NotFound,
// and hands resolved values to the pure engine.

pub mod locks;
pub mod matches;
pub mod players;
pub mod queues;

pub use locks::QueueLocks;

use crate::domain::{engine, Player, PlayerId, Queue, QueueId, QueueMode};
use crate::error::Result;
use crate::port::{IdProvider, PlayerRepository, QueueRepository, TimeProvider};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Store-wide counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceStats {
    pub queue_count: i64,
    pub player_count: i64,
}

/// Queue Service
pub struct QueueService {
    queue_repo: Arc<dyn QueueRepository>,
    player_repo: Arc<dyn PlayerRepository>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
    locks: QueueLocks,
    create_lock: Mutex<()>,
}

impl QueueService {
    pub fn new(
        queue_repo: Arc<dyn QueueRepository>,
        player_repo: Arc<dyn PlayerRepository>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            queue_repo,
            player_repo,
            id_provider,
            time_provider,
            locks: QueueLocks::new(),
            create_lock: Mutex::new(()),
        }
    }

    /// Create an empty queue
    pub async fn create_queue(&self, mode: QueueMode) -> Result<Queue> {
        queues::create(
            self.queue_repo.as_ref(),
            self.id_provider.as_ref(),
            self.time_provider.as_ref(),
            mode,
        )
        .await
    }

    pub async fn get_queue(&self, queue_id: &QueueId) -> Result<Queue> {
        queues::find(self.queue_repo.as_ref(), queue_id).await
    }

    /// Most recently created queue, creating an empty singles queue if there is none
    pub async fn latest_queue(&self) -> Result<Queue> {
        let _guard = self.create_lock.lock().await;

        if let Some(queue) = self.queue_repo.latest().await? {
            return Ok(queue);
        }

        info!("No queue yet, creating default");
        self.create_queue(QueueMode::default()).await
    }

    /// Register a new player
    pub async fn register_player(&self, name: &str) -> Result<Player> {
        players::register(self.player_repo.as_ref(), self.id_provider.as_ref(), name).await
    }

    pub async fn list_players(&self) -> Result<Vec<Player>> {
        self.player_repo.list().await
    }

    /// Put a registered player at the back of the queue (no-op if already queued)
    pub async fn enqueue_player(&self, queue_id: &QueueId, player_id: &PlayerId) -> Result<Queue> {
        let player = players::find(self.player_repo.as_ref(), player_id).await?;

        let queue = self
            .mutate(queue_id, move |queue| engine::add(player, queue))
            .await?;

        info!(queue_id = %queue_id, player_id = %player_id, "Player enqueued");
        Ok(queue)
    }

    /// Take a registered player out of the queue (no-op if not queued)
    pub async fn dequeue_player(&self, queue_id: &QueueId, player_id: &PlayerId) -> Result<Queue> {
        let player = players::find(self.player_repo.as_ref(), player_id).await?;

        let queue = self
            .mutate(queue_id, move |queue| engine::remove(&player.id, queue))
            .await?;

        info!(queue_id = %queue_id, player_id = %player_id, "Player dequeued");
        Ok(queue)
    }

    pub async fn set_mode(&self, queue_id: &QueueId, mode: QueueMode) -> Result<Queue> {
        let now = self.time_provider.now_millis();

        let queue = self
            .mutate(queue_id, move |queue| engine::set_mode(queue, mode, now))
            .await?;

        info!(queue_id = %queue_id, mode = %mode, "Queue mode set");
        Ok(queue)
    }

    /// Re-sequence the queue; the result is always a permutation of the stored players
    pub async fn reorder_queue(
        &self,
        queue_id: &QueueId,
        ordered_ids: Vec<PlayerId>,
    ) -> Result<Queue> {
        let now = self.time_provider.now_millis();

        let queue = self
            .mutate(queue_id, move |queue| {
                engine::reorder(queue, &ordered_ids, now)
            })
            .await?;

        info!(queue_id = %queue_id, "Queue reordered");
        Ok(queue)
    }

    /// Winner stays on: move `losing_ids` to the back
    pub async fn rotate_after_match(
        &self,
        queue_id: &QueueId,
        losing_ids: HashSet<PlayerId>,
    ) -> Result<Queue> {
        let now = self.time_provider.now_millis();
        let losers = losing_ids.len();

        let queue = self
            .mutate(queue_id, move |queue| {
                engine::rotate_after_match(queue, &losing_ids, now)
            })
            .await?;

        info!(queue_id = %queue_id, losers, "Match rotated");
        Ok(queue)
    }

    /// Finish the current match by declaring the winning side
    ///
    /// Losers are the match participants outside `winning_ids`, computed
    /// against the queue as stored when the lock is taken.
    pub async fn finish_match(
        &self,
        queue_id: &QueueId,
        winning_ids: HashSet<PlayerId>,
    ) -> Result<Queue> {
        let now = self.time_provider.now_millis();

        let queue = self
            .mutate(queue_id, move |queue| {
                let losers = engine::losers_for_winners(&queue, &winning_ids);
                engine::rotate_after_match(queue, &losers, now)
            })
            .await?;

        info!(queue_id = %queue_id, "Match finished");
        Ok(queue)
    }

    /// Uniformly shuffle the queue
    pub async fn randomize_queue(&self, queue_id: &QueueId) -> Result<Queue> {
        let now = self.time_provider.now_millis();

        let queue = self
            .mutate(queue_id, move |queue| matches::randomize_now(queue, now))
            .await?;

        info!(queue_id = %queue_id, "Queue randomized");
        Ok(queue)
    }

    pub async fn stats(&self) -> Result<ServiceStats> {
        Ok(ServiceStats {
            queue_count: self.queue_repo.count().await?,
            player_count: self.player_repo.count().await?,
        })
    }

    async fn mutate<F>(&self, queue_id: &QueueId, transform: F) -> Result<Queue>
    where
        F: FnOnce(Queue) -> Queue + Send,
    {
        matches::mutate(self.queue_repo.as_ref(), &self.locks, queue_id, transform).await
    }
}
