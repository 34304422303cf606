//! Simple example of using the Queue Up SDK
//!
//! Run with:
//! ```bash
//! # Start daemon first
//! cargo run --bin queueup-daemon
//!
//! # Then run example
//! cargo run --example simple -p queueup-sdk
//! ```

use queueup_sdk::QueueUpClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("Queue Up SDK Example\n");

    // 1. Connect
    println!("1. Connecting to daemon...");
    let client = QueueUpClient::connect("http://127.0.0.1:9530").await?;
    println!("   ✓ Connected\n");

    // 2. Create a singles queue and fill it
    println!("2. Creating queue...");
    let queue = client.create_queue("singles").await?;
    println!("   ✓ Queue {}\n", queue.id);

    println!("3. Registering and enqueuing players...");
    let mut queue = queue;
    for name in ["Ada", "Bo", "Cy", "Di"] {
        let player = client.register_player(name).await?;
        queue = client.enqueue(&queue.id, &player.id).await?;
        println!("   ✓ {} ({})", player.name, player.id);
    }
    println!();

    print_queue("Initial", &queue);

    // 4. First player wins; the other rotates to the back
    let winner = queue.players[0].clone();
    println!("4. {} wins the match...", winner.name);
    let queue = client.finish_match(&queue.id, vec![winner.id]).await?;
    print_queue("After match", &queue);

    // 5. Switch to doubles
    println!("5. Switching to doubles...");
    let queue = client.set_mode(&queue.id, "doubles").await?;
    print_queue("Doubles", &queue);

    // 6. Shuffle
    println!("6. Randomizing...");
    let queue = client.randomize(&queue.id).await?;
    print_queue("Shuffled", &queue);

    let stats = client.stats().await?;
    println!(
        "✓ Example completed: {} queues, {} players",
        stats.queue_count, stats.player_count
    );

    Ok(())
}

fn print_queue(label: &str, queue: &queueup_sdk::Queue) {
    println!("   {} ({}):", label, queue.queue_mode);
    for player in queue.current_match() {
        println!("     [match]   {}", player.name);
    }
    for player in queue.waiting() {
        println!("     [waiting] {}", player.name);
    }
    println!();
}
