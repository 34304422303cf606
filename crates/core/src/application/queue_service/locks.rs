// Per-queue mutation locks

use crate::domain::QueueId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = HashMap<QueueId, Arc<AsyncMutex<()>>>;

/// Serializes read-modify-write cycles per queue ID
///
/// Holding the guard for a queue blocks other mutations of that queue only;
/// different queues proceed independently. An entry lives only while some
/// caller holds or waits on it, so the map never outgrows the in-flight work.
#[derive(Default)]
pub struct QueueLocks {
    locks: Mutex<LockMap>,
}

/// Exclusive access to one queue; releases its map entry on drop when unused
pub struct QueueGuard<'a> {
    owner: &'a QueueLocks,
    queue_id: QueueId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl QueueLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `queue_id`
    pub async fn acquire(&self, queue_id: &str) -> QueueGuard<'_> {
        // Cloned under the map lock, so the entry cannot be released meanwhile
        let lock = self
            .map()
            .entry(queue_id.to_string())
            .or_default()
            .clone();

        QueueGuard {
            owner: self,
            queue_id: queue_id.to_string(),
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Queue IDs currently held or awaited
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.map().len()
    }

    fn map(&self) -> MutexGuard<'_, LockMap> {
        // The map is never left half-updated, so a poisoned lock is still usable
        self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for QueueGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());

        let mut locks = self.owner.map();
        let unused = locks
            .get(&self.queue_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1);
        if unused {
            locks.remove(&self.queue_id);
        }
    }
}
