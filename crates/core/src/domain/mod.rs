// Domain Layer - Pure business logic and entities

pub mod engine;
pub mod error;
pub mod player;
pub mod queue;

// Re-exports
pub use error::DomainError;
pub use player::{Player, PlayerId, PlayerName};
pub use queue::{Queue, QueueId, QueueMode};
