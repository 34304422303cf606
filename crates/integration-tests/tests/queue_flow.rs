//! Queue flows through the service and in-memory store

mod common;

use common::{harness, names, seat, START_MS};
use queueup_core::domain::QueueMode;
use queueup_core::error::AppError;
use std::collections::HashSet;
use tokio_test::assert_ok;

fn ids(players: &[&queueup_core::domain::Player]) -> HashSet<String> {
    players.iter().map(|p| p.id.clone()).collect()
}

#[tokio::test]
async fn test_singles_winner_stays_on() {
    let h = harness();
    let queue = assert_ok!(h.service.create_queue(QueueMode::Singles).await);
    let players = seat(&h.service, &queue, &["P1", "P2", "P3"]).await;

    let queue = assert_ok!(h.service.get_queue(&queue.id).await);
    assert_eq!(names(&queue), vec!["P1", "P2", "P3"]);
    assert_eq!(queue.match_started_at, None);

    let queue = assert_ok!(
        h.service
            .rotate_after_match(&queue.id, ids(&[&players[0]]))
            .await
    );

    assert_eq!(names(&queue), vec!["P2", "P3", "P1"]);
    assert_eq!(queue.match_started_at, Some(START_MS));
}

#[tokio::test]
async fn test_doubles_losers_rotate_in_order() {
    let h = harness();
    let queue = assert_ok!(h.service.create_queue(QueueMode::Doubles).await);
    let p = seat(&h.service, &queue, &["A", "B", "C", "D"]).await;

    let queue = assert_ok!(
        h.service
            .rotate_after_match(&queue.id, ids(&[&p[0], &p[2]]))
            .await
    );

    assert_eq!(names(&queue), vec!["B", "D", "A", "C"]);
}

#[tokio::test]
async fn test_doubles_partition_keeps_waiting_players_ahead() {
    let h = harness();
    let queue = assert_ok!(h.service.create_queue(QueueMode::Doubles).await);
    let p = seat(&h.service, &queue, &["A", "B", "C", "D", "E"]).await;

    let queue = assert_ok!(
        h.service
            .rotate_after_match(&queue.id, ids(&[&p[1], &p[3]]))
            .await
    );

    assert_eq!(names(&queue), vec!["A", "C", "E", "B", "D"]);
}

#[tokio::test]
async fn test_finish_match_rotates_everyone_but_winners() {
    let h = harness();
    let queue = assert_ok!(h.service.create_queue(QueueMode::Doubles).await);
    let p = seat(&h.service, &queue, &["A", "B", "C", "D", "E", "F"]).await;

    // A and C win; B and D lose, E and F step up
    let queue = assert_ok!(
        h.service
            .finish_match(&queue.id, ids(&[&p[0], &p[2]]))
            .await
    );

    assert_eq!(names(&queue), vec!["A", "C", "E", "F", "B", "D"]);
    assert_eq!(
        queue.current_match().iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec!["A", "C", "E", "F"]
    );
}

#[tokio::test]
async fn test_short_queue_does_not_rotate() {
    let h = harness();
    let queue = assert_ok!(h.service.create_queue(QueueMode::Doubles).await);
    let p = seat(&h.service, &queue, &["A", "B", "C"]).await;

    let queue = assert_ok!(
        h.service
            .rotate_after_match(&queue.id, ids(&[&p[0]]))
            .await
    );

    assert_eq!(names(&queue), vec!["A", "B", "C"]);
    assert_eq!(queue.match_started_at, None);
}

#[tokio::test]
async fn test_enqueue_is_idempotent_and_dequeue_total() {
    let h = harness();
    let queue = assert_ok!(h.service.create_queue(QueueMode::Singles).await);
    let p = seat(&h.service, &queue, &["A", "B"]).await;

    let queue = assert_ok!(h.service.enqueue_player(&queue.id, &p[0].id).await);
    assert_eq!(names(&queue), vec!["A", "B"]);

    let queue = assert_ok!(h.service.dequeue_player(&queue.id, &p[0].id).await);
    assert_eq!(names(&queue), vec!["B"]);

    // Removing an absent player is a no-op
    let queue = assert_ok!(h.service.dequeue_player(&queue.id, &p[0].id).await);
    assert_eq!(names(&queue), vec!["B"]);
}

#[tokio::test]
async fn test_reorder_with_partial_and_unknown_ids() {
    let h = harness();
    let queue = assert_ok!(h.service.create_queue(QueueMode::Singles).await);
    let p = seat(&h.service, &queue, &["A", "B", "C", "D"]).await;

    h.clock.advance(5_000);
    let queue = assert_ok!(
        h.service
            .reorder_queue(
                &queue.id,
                vec![p[3].id.clone(), "ghost".to_string(), p[1].id.clone()],
            )
            .await
    );

    assert_eq!(names(&queue), vec!["D", "B", "A", "C"]);
    assert_eq!(queue.match_started_at, Some(START_MS + 5_000));
}

#[tokio::test]
async fn test_mode_switch_changes_match_size_and_clock() {
    let h = harness();
    let queue = assert_ok!(h.service.create_queue(QueueMode::Singles).await);
    seat(&h.service, &queue, &["A", "B", "C", "D"]).await;

    h.clock.advance(1_000);
    let queue = assert_ok!(h.service.set_mode(&queue.id, QueueMode::Doubles).await);
    assert_eq!(queue.match_size(), 4);
    assert!(queue.has_full_match());
    assert_eq!(queue.match_started_at, Some(START_MS + 1_000));

    // Same mode again leaves the clock alone
    h.clock.advance(1_000);
    let queue = assert_ok!(h.service.set_mode(&queue.id, QueueMode::Doubles).await);
    assert_eq!(queue.match_started_at, Some(START_MS + 1_000));
}

#[tokio::test]
async fn test_randomize_preserves_players() {
    let h = harness();
    let queue = assert_ok!(h.service.create_queue(QueueMode::Doubles).await);
    seat(&h.service, &queue, &["A", "B", "C", "D", "E", "F", "G"]).await;

    let queue = assert_ok!(h.service.randomize_queue(&queue.id).await);

    let mut shuffled = names(&queue);
    shuffled.sort();
    assert_eq!(shuffled, vec!["A", "B", "C", "D", "E", "F", "G"]);
    assert_eq!(queue.match_started_at, Some(START_MS));
}

#[tokio::test]
async fn test_latest_queue_creates_then_tracks_newest() {
    let h = harness();

    let first = assert_ok!(h.service.latest_queue().await);
    assert_eq!(first.queue_mode, QueueMode::Singles);
    assert!(first.players.is_empty());

    // Repeated calls do not create more queues
    let again = assert_ok!(h.service.latest_queue().await);
    assert_eq!(again.id, first.id);

    h.clock.advance(10);
    let newer = assert_ok!(h.service.create_queue(QueueMode::Doubles).await);
    let latest = assert_ok!(h.service.latest_queue().await);
    assert_eq!(latest.id, newer.id);

    let stats = assert_ok!(h.service.stats().await);
    assert_eq!(stats.queue_count, 2);
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let h = harness();
    let queue = assert_ok!(h.service.create_queue(QueueMode::Singles).await);
    let player = assert_ok!(h.service.register_player("Ada").await);

    let missing_queue = "nope".to_string();
    assert!(matches!(
        h.service.get_queue(&missing_queue).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        h.service.enqueue_player(&missing_queue, &player.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        h.service
            .enqueue_player(&queue.id, &"ghost".to_string())
            .await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_invalid_names_are_rejected() {
    let h = harness();

    assert!(matches!(
        h.service.register_player("   ").await,
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        h.service.register_player(&"x".repeat(65)).await,
        Err(AppError::Validation(_))
    ));

    let player = assert_ok!(h.service.register_player("  Ada  ").await);
    assert_eq!(player.name, "Ada");
}

#[tokio::test]
async fn test_store_close_drops_state() {
    let h = harness();
    let queue = assert_ok!(h.service.create_queue(QueueMode::Singles).await);
    seat(&h.service, &queue, &["A"]).await;

    let service = h.service.clone();
    h.store.close().await;

    let stats = assert_ok!(service.stats().await);
    assert_eq!(stats.queue_count, 0);
    assert_eq!(stats.player_count, 0);
}
