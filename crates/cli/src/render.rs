//! Terminal rendering for queues and players

use colored::Colorize;
use serde::Deserialize;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerView {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueueView {
    pub id: String,
    pub queue_mode: String,
    pub match_size: usize,
    pub players: Vec<PlayerView>,
    pub match_started_at: Option<i64>,
}

#[derive(Tabled)]
struct QueueRow {
    #[tabled(rename = "#")]
    position: usize,
    name: String,
    id: String,
    status: String,
}

#[derive(Tabled)]
struct PlayerRow {
    name: String,
    id: String,
}

/// Elapsed match time as m:ss
pub fn format_clock(elapsed_ms: i64) -> String {
    let secs = elapsed_ms.max(0) / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn queue_rows(queue: &QueueView) -> Vec<QueueRow> {
    queue
        .players
        .iter()
        .enumerate()
        .map(|(i, player)| QueueRow {
            position: i + 1,
            name: player.name.clone(),
            id: player.id.clone(),
            status: if i < queue.match_size {
                "MATCH".to_string()
            } else {
                "WAITING".to_string()
            },
        })
        .collect()
}

pub fn print_queue(queue: &QueueView, now_ms: i64) {
    println!(
        "{} {} ({})",
        "Queue".cyan().bold(),
        queue.id,
        queue.queue_mode
    );

    match queue.match_started_at {
        Some(started) if queue.players.len() >= queue.match_size => {
            println!(
                "  {} {}",
                "Match clock:".bold(),
                format_clock(now_ms - started).green()
            );
        }
        _ => println!("  {} {}", "Match clock:".bold(), "--:--".dimmed()),
    }
    println!();

    if queue.players.is_empty() {
        println!("{}", "Queue is empty".yellow());
        return;
    }

    println!("{}", Table::new(queue_rows(queue)));
}

pub fn print_players(players: &[PlayerView]) {
    if players.is_empty() {
        println!("{}", "No players registered".yellow());
        return;
    }

    let rows: Vec<PlayerRow> = players
        .iter()
        .map(|p| PlayerRow {
            name: p.name.clone(),
            id: p.id.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(59_999), "0:59");
        assert_eq!(format_clock(61_000), "1:01");
        assert_eq!(format_clock(12 * 60_000 + 5_000), "12:05");
        assert_eq!(format_clock(-500), "0:00");
    }

    #[test]
    fn test_rows_mark_match_and_waiting() {
        let queue = QueueView {
            id: "q-1".to_string(),
            queue_mode: "singles".to_string(),
            match_size: 2,
            players: ["Ada", "Bo", "Cy"]
                .iter()
                .enumerate()
                .map(|(i, name)| PlayerView {
                    id: format!("p-{}", i),
                    name: name.to_string(),
                })
                .collect(),
            match_started_at: None,
        };

        let rows = queue_rows(&queue);
        let statuses: Vec<&str> = rows.iter().map(|r| r.status.as_str()).collect();
        assert_eq!(statuses, vec!["MATCH", "MATCH", "WAITING"]);
        assert_eq!(rows[2].position, 3);
    }
}
