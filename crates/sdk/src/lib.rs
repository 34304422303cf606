//! Queue Up SDK - Rust Client Library
//!
//! Provides a typed client for the Queue Up daemon's JSON-RPC API.
//!
//! # Example
//!
//! ```no_run
//! use queueup_sdk::QueueUpClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = QueueUpClient::connect("http://127.0.0.1:9530").await?;
//!
//!     let queue = client.create_queue("singles").await?;
//!     for name in ["Ada", "Bo", "Cy"] {
//!         let player = client.register_player(name).await?;
//!         client.enqueue(&queue.id, &player.id).await?;
//!     }
//!
//!     // Ada beat Bo: Bo goes to the back, Cy steps up
//!     let queue = client.latest_queue().await?;
//!     let winner = queue.players[0].id.clone();
//!     let queue = client.finish_match(&queue.id, vec![winner]).await?;
//!     println!("Next match: {:?}", queue.current_match());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::QueueUpClient;
pub use error::{Result, SdkError};
pub use types::{Player, Queue, Stats};
