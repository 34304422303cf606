// Queue Lifecycle Use Cases

use crate::domain::{Queue, QueueId, QueueMode};
use crate::error::{AppError, Result};
use crate::port::{IdProvider, QueueRepository, TimeProvider};
use tracing::info;

/// Create an empty queue in `mode`
pub async fn create(
    queue_repo: &dyn QueueRepository,
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
    mode: QueueMode,
) -> Result<Queue> {
    let queue = Queue::new(id_provider.generate_id(), time_provider.now_millis(), mode);
    queue_repo.insert(&queue).await?;

    info!(queue_id = %queue.id, mode = %mode, "Queue created");
    Ok(queue)
}

/// Resolve a queue or fail with NotFound
pub async fn find(queue_repo: &dyn QueueRepository, queue_id: &QueueId) -> Result<Queue> {
    queue_repo
        .find_by_id(queue_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Queue {} not found", queue_id)))
}
