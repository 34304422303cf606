// Queue Mutation Use Cases
//
// Each use case resolves its inputs, then runs one engine transformation as a
// serialized read-modify-write on the stored queue.

use super::locks::QueueLocks;
use crate::domain::{engine, Queue, QueueId};
use crate::error::Result;
use crate::port::QueueRepository;
use tracing::debug;

/// Apply `transform` to the stored queue while holding its lock
///
/// The transformed queue fully replaces the stored one.
pub async fn mutate<F>(
    queue_repo: &dyn QueueRepository,
    locks: &QueueLocks,
    queue_id: &QueueId,
    transform: F,
) -> Result<Queue>
where
    F: FnOnce(Queue) -> Queue + Send,
{
    let _guard = locks.acquire(queue_id).await;

    let current = super::queues::find(queue_repo, queue_id).await?;
    let before = current.player_ids();
    let updated = transform(current);

    queue_repo.update(&updated).await?;

    debug!(
        queue_id = %updated.id,
        before = ?before,
        after = ?updated.player_ids(),
        "Queue updated"
    );
    Ok(updated)
}

/// Randomize with a fresh thread-local RNG
///
/// The RNG lives only for the duration of the shuffle, so it is never held
/// across an await point.
pub fn randomize_now(queue: Queue, now_millis: i64) -> Queue {
    engine::randomize(queue, &mut rand::thread_rng(), now_millis)
}
