//! Queue Up CLI - Command-line interface for the Queue Up daemon

mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use render::{PlayerView, QueueView};
use serde::{Deserialize, Serialize};
use serde_json::json;

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9530";

#[derive(Parser)]
#[command(name = "queueup")]
#[command(about = "Queue Up CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "QUEUEUP_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new queue
    Create {
        /// Queue mode: singles or doubles
        #[arg(short, long, default_value = "singles")]
        mode: String,
    },

    /// Show a queue (latest when omitted)
    Show {
        /// Queue ID
        queue_id: Option<String>,
    },

    /// List registered players
    Players,

    /// Register a player and put them in a queue
    Join {
        /// Player name
        name: String,

        /// Queue ID (default: latest)
        #[arg(short, long)]
        queue: Option<String>,
    },

    /// Add an existing player to the back of a queue
    Enqueue {
        /// Player ID
        player_id: String,

        /// Queue ID (default: latest)
        #[arg(short, long)]
        queue: Option<String>,
    },

    /// Remove a player from a queue
    Dequeue {
        /// Player ID
        player_id: String,

        /// Queue ID (default: latest)
        #[arg(short, long)]
        queue: Option<String>,
    },

    /// Switch between singles and doubles
    Mode {
        /// singles or doubles
        mode: String,

        /// Queue ID (default: latest)
        #[arg(short, long)]
        queue: Option<String>,
    },

    /// Move the given players to the front, in order
    Reorder {
        /// Player IDs, front first
        #[arg(required = true, num_args = 1..)]
        player_ids: Vec<String>,

        /// Queue ID (default: latest)
        #[arg(short, long)]
        queue: Option<String>,
    },

    /// Send the losing side of the current match to the back
    Rotate {
        /// Losing player IDs
        #[arg(long, required = true, num_args = 1..)]
        losers: Vec<String>,

        /// Queue ID (default: latest)
        #[arg(short, long)]
        queue: Option<String>,
    },

    /// Finish the current match by naming the winners
    Win {
        /// Winning player IDs
        #[arg(long, required = true, num_args = 1..)]
        winners: Vec<String>,

        /// Queue ID (default: latest)
        #[arg(short, long)]
        queue: Option<String>,
    },

    /// Shuffle the queue
    Randomize {
        /// Queue ID (default: latest)
        #[arg(short, long)]
        queue: Option<String>,
    },

    /// Show daemon status
    Status,
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize)]
struct PlayerList {
    players: Vec<PlayerView>,
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

async fn call_queue(url: &str, method: &str, params: serde_json::Value) -> Result<QueueView> {
    let result = call_rpc(url, method, params).await?;
    serde_json::from_value(result).context("Unexpected queue shape")
}

/// Explicit queue ID, or the daemon's latest queue
async fn resolve_queue(url: &str, queue: Option<String>) -> Result<String> {
    match queue {
        Some(id) => Ok(id),
        None => Ok(call_queue(url, "queue.latest.v1", json!({})).await?.id),
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn success(message: impl AsRef<str>) {
    println!("{}", format!("✓ {}", message.as_ref()).green().bold());
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let url = cli.rpc_url.as_str();

    match cli.command {
        Commands::Create { mode } => {
            let queue = call_queue(url, "queue.create.v1", json!({ "mode": mode })).await?;
            success(format!("Queue {} created", queue.id));
            render::print_queue(&queue, now_millis());
        }

        Commands::Show { queue_id } => {
            let queue = match queue_id {
                Some(id) => call_queue(url, "queue.get.v1", json!({ "queue_id": id })).await?,
                None => call_queue(url, "queue.latest.v1", json!({})).await?,
            };
            render::print_queue(&queue, now_millis());
        }

        Commands::Players => {
            let result = call_rpc(url, "player.list.v1", json!({})).await?;
            let list: PlayerList = serde_json::from_value(result)?;
            render::print_players(&list.players);
        }

        Commands::Join { name, queue } => {
            let result = call_rpc(url, "player.register.v1", json!({ "name": name })).await?;
            let player: PlayerView = serde_json::from_value(result)?;

            let queue_id = resolve_queue(url, queue).await?;
            let queue = call_queue(
                url,
                "queue.enqueue.v1",
                json!({ "queue_id": queue_id, "player_id": player.id }),
            )
            .await?;

            success(format!("{} ({}) joined", player.name, player.id));
            render::print_queue(&queue, now_millis());
        }

        Commands::Enqueue { player_id, queue } => {
            let queue_id = resolve_queue(url, queue).await?;
            let queue = call_queue(
                url,
                "queue.enqueue.v1",
                json!({ "queue_id": queue_id, "player_id": player_id }),
            )
            .await?;
            success(format!("Player {} enqueued", player_id));
            render::print_queue(&queue, now_millis());
        }

        Commands::Dequeue { player_id, queue } => {
            let queue_id = resolve_queue(url, queue).await?;
            let queue = call_queue(
                url,
                "queue.dequeue.v1",
                json!({ "queue_id": queue_id, "player_id": player_id }),
            )
            .await?;
            success(format!("Player {} removed", player_id));
            render::print_queue(&queue, now_millis());
        }

        Commands::Mode { mode, queue } => {
            let queue_id = resolve_queue(url, queue).await?;
            let queue = call_queue(
                url,
                "queue.set_mode.v1",
                json!({ "queue_id": queue_id, "mode": mode }),
            )
            .await?;
            success(format!("Mode set to {}", queue.queue_mode));
            render::print_queue(&queue, now_millis());
        }

        Commands::Reorder { player_ids, queue } => {
            let queue_id = resolve_queue(url, queue).await?;
            let queue = call_queue(
                url,
                "queue.reorder.v1",
                json!({ "queue_id": queue_id, "player_ids": player_ids }),
            )
            .await?;
            success("Queue reordered");
            render::print_queue(&queue, now_millis());
        }

        Commands::Rotate { losers, queue } => {
            let queue_id = resolve_queue(url, queue).await?;
            let queue = call_queue(
                url,
                "queue.rotate.v1",
                json!({ "queue_id": queue_id, "losing_player_ids": losers }),
            )
            .await?;
            success("Losers rotated to the back");
            render::print_queue(&queue, now_millis());
        }

        Commands::Win { winners, queue } => {
            let queue_id = resolve_queue(url, queue).await?;
            let queue = call_queue(
                url,
                "queue.finish_match.v1",
                json!({ "queue_id": queue_id, "winning_player_ids": winners }),
            )
            .await?;
            success("Match finished");
            render::print_queue(&queue, now_millis());
        }

        Commands::Randomize { queue } => {
            let queue_id = resolve_queue(url, queue).await?;
            let queue = call_queue(
                url,
                "queue.randomize.v1",
                json!({ "queue_id": queue_id }),
            )
            .await?;
            success("Queue shuffled");
            render::print_queue(&queue, now_millis());
        }

        Commands::Status => {
            println!("{}", "System Status".cyan().bold());
            println!();

            match call_rpc(url, "admin.stats.v1", json!({})).await {
                Ok(stats) => {
                    println!("  {} {}", "RPC URL:".bold(), url);
                    println!("  {} {}", "Status:".bold(), "ONLINE".green());
                    println!();
                    println!("  {} {}", "Queues:".bold(), stats["queue_count"]);
                    println!("  {} {}", "Players:".bold(), stats["player_count"]);
                    println!("  {} {} seconds", "Uptime:".bold(), stats["uptime_seconds"]);
                }
                Err(e) => {
                    println!("  {} {}", "Status:".bold(), "ERROR".red());
                    println!("  {} {}", "Error:".bold(), e);
                }
            }
        }
    }

    Ok(())
}
