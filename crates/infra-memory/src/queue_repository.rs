// In-Memory QueueRepository Implementation

use async_trait::async_trait;
use queueup_core::domain::{Queue, QueueId};
use queueup_core::error::{AppError, Result};
use queueup_core::port::QueueRepository;
use std::collections::HashMap;
use tokio::sync::RwLock;

struct StoredQueue {
    seq: u64, // insertion order, breaks created_at ties
    queue: Queue,
}

#[derive(Default)]
struct Inner {
    queues: HashMap<QueueId, StoredQueue>,
    next_seq: u64,
}

#[derive(Default)]
pub struct InMemoryQueueRepository {
    inner: RwLock<Inner>,
}

impl InMemoryQueueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every stored queue, returning how many there were
    pub async fn clear(&self) -> usize {
        let mut inner = self.inner.write().await;
        let dropped = inner.queues.len();
        inner.queues.clear();
        dropped
    }
}

#[async_trait]
impl QueueRepository for InMemoryQueueRepository {
    async fn insert(&self, queue: &Queue) -> Result<()> {
        let mut inner = self.inner.write().await;

        if inner.queues.contains_key(&queue.id) {
            return Err(AppError::Internal(format!(
                "Queue {} already exists",
                queue.id
            )));
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.queues.insert(
            queue.id.clone(),
            StoredQueue {
                seq,
                queue: queue.clone(),
            },
        );

        Ok(())
    }

    async fn find_by_id(&self, id: &QueueId) -> Result<Option<Queue>> {
        let inner = self.inner.read().await;
        Ok(inner.queues.get(id).map(|stored| stored.queue.clone()))
    }

    async fn update(&self, queue: &Queue) -> Result<()> {
        let mut inner = self.inner.write().await;

        match inner.queues.get_mut(&queue.id) {
            Some(stored) => {
                stored.queue = queue.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Queue {} not found", queue.id))),
        }
    }

    async fn latest(&self) -> Result<Option<Queue>> {
        let inner = self.inner.read().await;

        Ok(inner
            .queues
            .values()
            .max_by_key(|stored| (stored.queue.created_at, stored.seq))
            .map(|stored| stored.queue.clone()))
    }

    async fn count(&self) -> Result<i64> {
        let inner = self.inner.read().await;
        Ok(inner.queues.len() as i64)
    }
}
