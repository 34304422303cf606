//! Queue Up Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    CreateQueueRequest, FinishMatchRequest, Player, PlayerList, Queue, QueuePlayerRequest,
    QueueRequest, RegisterPlayerRequest, ReorderRequest, RotateRequest, SetModeRequest, Stats,
};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Queue Up Client
///
/// High-level interface to the Queue Up daemon. Every queue.* method returns
/// the queue as it stands after the operation.
///
/// # Example
///
/// ```no_run
/// use queueup_sdk::QueueUpClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = QueueUpClient::connect("http://127.0.0.1:9530").await?;
/// let queue = client.latest_queue().await?;
/// println!("{} players in {}", queue.players.len(), queue.id);
/// # Ok(())
/// # }
/// ```
pub struct QueueUpClient {
    client: HttpClient,
}

impl QueueUpClient {
    /// Connect to the Queue Up daemon
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:9530`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();

        let client = HttpClientBuilder::default()
            .request_timeout(Duration::from_secs(30))
            .build(url)
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    /// Create an empty queue ("singles" or "doubles")
    pub async fn create_queue(&self, mode: &str) -> Result<Queue> {
        self.call("queue.create.v1", &CreateQueueRequest { mode })
            .await
    }

    pub async fn get_queue(&self, queue_id: &str) -> Result<Queue> {
        self.call("queue.get.v1", &QueueRequest { queue_id }).await
    }

    /// Most recently created queue; the daemon creates one if none exists
    pub async fn latest_queue(&self) -> Result<Queue> {
        Ok(self.client.request("queue.latest.v1", rpc_params![]).await?)
    }

    pub async fn register_player(&self, name: &str) -> Result<Player> {
        self.call("player.register.v1", &RegisterPlayerRequest { name })
            .await
    }

    /// All players in registration order
    pub async fn list_players(&self) -> Result<Vec<Player>> {
        let list: PlayerList = self.client.request("player.list.v1", rpc_params![]).await?;
        Ok(list.players)
    }

    /// Append a player to the back; no-op if already queued
    pub async fn enqueue(&self, queue_id: &str, player_id: &str) -> Result<Queue> {
        self.call(
            "queue.enqueue.v1",
            &QueuePlayerRequest {
                queue_id,
                player_id,
            },
        )
        .await
    }

    pub async fn dequeue(&self, queue_id: &str, player_id: &str) -> Result<Queue> {
        self.call(
            "queue.dequeue.v1",
            &QueuePlayerRequest {
                queue_id,
                player_id,
            },
        )
        .await
    }

    pub async fn set_mode(&self, queue_id: &str, mode: &str) -> Result<Queue> {
        self.call("queue.set_mode.v1", &SetModeRequest { queue_id, mode })
            .await
    }

    /// Put the listed players first, in the given order
    pub async fn reorder(&self, queue_id: &str, player_ids: Vec<String>) -> Result<Queue> {
        self.call(
            "queue.reorder.v1",
            &ReorderRequest {
                queue_id,
                player_ids,
            },
        )
        .await
    }

    /// Move the losing side of the current match to the back
    pub async fn rotate(&self, queue_id: &str, losing_player_ids: Vec<String>) -> Result<Queue> {
        self.call(
            "queue.rotate.v1",
            &RotateRequest {
                queue_id,
                losing_player_ids,
            },
        )
        .await
    }

    /// Declare the winners; everyone else in the match rotates out
    pub async fn finish_match(
        &self,
        queue_id: &str,
        winning_player_ids: Vec<String>,
    ) -> Result<Queue> {
        self.call(
            "queue.finish_match.v1",
            &FinishMatchRequest {
                queue_id,
                winning_player_ids,
            },
        )
        .await
    }

    pub async fn randomize(&self, queue_id: &str) -> Result<Queue> {
        self.call("queue.randomize.v1", &QueueRequest { queue_id })
            .await
    }

    pub async fn stats(&self) -> Result<Stats> {
        Ok(self.client.request("admin.stats.v1", rpc_params![]).await?)
    }

    async fn call<P, R>(&self, method: &str, request: &P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let params = object_params(request)?;
        Ok(self.client.request(method, params).await?)
    }
}

/// Send requests as named params so the server can parse them into structs
fn object_params<P: Serialize>(request: &P) -> Result<ObjectParams> {
    let mut params = ObjectParams::new();
    if let serde_json::Value::Object(fields) = serde_json::to_value(request)? {
        for (key, value) in fields {
            params.insert(&key, value)?;
        }
    }
    Ok(params)
}
