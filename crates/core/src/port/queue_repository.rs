// Queue Repository Port (Interface)

use crate::domain::{Queue, QueueId};
use crate::error::Result;
use async_trait::async_trait;

/// Key-value store of queues by ID
///
/// The engine never touches this; only the application service resolves
/// queues through it, so a durable backend can replace the in-memory one
/// without changes to the engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueRepository: Send + Sync {
    /// Insert a new queue
    async fn insert(&self, queue: &Queue) -> Result<()>;

    /// Find queue by ID
    async fn find_by_id(&self, id: &QueueId) -> Result<Option<Queue>>;

    /// Replace the stored queue with the same ID
    async fn update(&self, queue: &Queue) -> Result<()>;

    /// Most recently created queue (highest `created_at`, later insert wins ties)
    async fn latest(&self) -> Result<Option<Queue>>;

    /// Number of stored queues
    async fn count(&self) -> Result<i64>;
}
