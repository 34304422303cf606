// Queue Up Infrastructure - In-Memory Adapter
// Implements: QueueRepository, PlayerRepository
// Process-wide state with no durability: everything is gone after shutdown.

mod player_repository;
mod queue_repository;
mod store;

pub use player_repository::InMemoryPlayerRepository;
pub use queue_repository::InMemoryQueueRepository;
pub use store::MemoryStore;
