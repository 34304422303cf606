// Application Layer - Use Cases and Business Logic

pub mod queue_service;

// Re-exports
pub use queue_service::{QueueLocks, QueueService, ServiceStats};
