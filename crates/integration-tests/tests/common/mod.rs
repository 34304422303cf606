//! Shared fixtures: a service over the in-memory store with a manual clock

#![allow(dead_code)]

use queueup_core::application::QueueService;
use queueup_core::domain::{Player, Queue};
use queueup_core::port::id_provider::SequentialIdProvider;
use queueup_core::port::time_provider::ManualTimeProvider;
use queueup_infra_memory::MemoryStore;
use std::sync::Arc;

pub const START_MS: i64 = 1_000_000;

pub struct Harness {
    pub service: Arc<QueueService>,
    pub clock: Arc<ManualTimeProvider>,
    pub store: MemoryStore,
}

pub fn harness() -> Harness {
    let store = MemoryStore::open();
    let clock = Arc::new(ManualTimeProvider::new(START_MS));
    let service = Arc::new(QueueService::new(
        store.queues(),
        store.players(),
        Arc::new(SequentialIdProvider::new("id")),
        clock.clone(),
    ));

    Harness {
        service,
        clock,
        store,
    }
}

/// Register players and enqueue them in order
pub async fn seat(service: &QueueService, queue: &Queue, names: &[&str]) -> Vec<Player> {
    let mut players = Vec::new();
    for name in names {
        let player = service.register_player(name).await.unwrap();
        service
            .enqueue_player(&queue.id, &player.id)
            .await
            .unwrap();
        players.push(player);
    }
    players
}

pub fn names(queue: &Queue) -> Vec<String> {
    queue.players.iter().map(|p| p.name.clone()).collect()
}
