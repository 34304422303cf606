// Queue Engine - "winner stays on" rotation and queue mutations
//
// Every operation takes the current queue by value and returns the resulting
// queue. The engine does no I/O and never reads the clock; the caller injects
// `now_millis` and the random source. Inputs that do not meet an operation's
// preconditions degrade to "nothing changed" instead of an error.

use crate::domain::player::{Player, PlayerId};
use crate::domain::queue::{Queue, QueueMode};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Append a player to the back of the line.
///
/// Idempotent: a player whose ID is already queued leaves the queue unchanged.
pub fn add(player: Player, mut queue: Queue) -> Queue {
    if queue.contains(&player.id) {
        return queue;
    }

    queue.players.push(player);
    queue
}

/// Remove the first entry with `player_id`, shifting everyone behind it forward.
///
/// Removing an absent player is a no-op.
pub fn remove(player_id: &str, mut queue: Queue) -> Queue {
    if let Some(index) = queue.players.iter().position(|p| p.id == player_id) {
        queue.players.remove(index);
    }

    queue
}

/// Re-sequence the queue to follow `ordered_ids`.
///
/// Unknown IDs are skipped and so are repeats of an ID already placed. Players
/// missing from `ordered_ids` are appended in their original relative order,
/// so the result is always a permutation of the input queue.
pub fn reorder(queue: Queue, ordered_ids: &[PlayerId], now_millis: i64) -> Queue {
    let mut remaining: Vec<Option<Player>> = queue.players.into_iter().map(Some).collect();
    let mut players = Vec::with_capacity(remaining.len());

    for id in ordered_ids {
        let slot = remaining
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|p| &p.id == id));

        if let Some(player) = slot.and_then(Option::take) {
            players.push(player);
        }
    }

    players.extend(remaining.into_iter().flatten());

    Queue {
        players,
        match_started_at: Some(now_millis),
        ..queue
    }
}

/// "Winner stays on": move the losers of the finished match to the back.
///
/// Everyone not in `losing_ids` keeps their relative order at the front; the
/// losers follow in their own prior relative order. No-op when `losing_ids` is
/// empty or the queue cannot field a full match.
pub fn rotate_after_match(queue: Queue, losing_ids: &HashSet<PlayerId>, now_millis: i64) -> Queue {
    if queue.players.is_empty() || losing_ids.is_empty() || !queue.has_full_match() {
        return queue;
    }

    let (losers, mut players): (Vec<Player>, Vec<Player>) = queue
        .players
        .into_iter()
        .partition(|p| losing_ids.contains(&p.id));
    players.extend(losers);

    Queue {
        players,
        match_started_at: Some(now_millis),
        ..queue
    }
}

/// Uniformly shuffle the queue (Fisher-Yates) and restart the match clock.
///
/// An empty queue is returned unchanged.
pub fn randomize<R: Rng + ?Sized>(mut queue: Queue, rng: &mut R, now_millis: i64) -> Queue {
    if queue.players.is_empty() {
        return queue;
    }

    queue.players.shuffle(rng);
    queue.match_started_at = Some(now_millis);
    queue
}

/// Switch between singles and doubles.
///
/// The match size changes with the mode, so a real change restarts the match
/// clock. Setting the current mode is a no-op.
pub fn set_mode(mut queue: Queue, mode: QueueMode, now_millis: i64) -> Queue {
    if queue.queue_mode == mode {
        return queue;
    }

    queue.queue_mode = mode;
    queue.match_started_at = Some(now_millis);
    queue
}

/// Losers of the current match given the declared winning side.
///
/// Every match participant not in `winning_ids` lost. Empty when the queue
/// cannot field a full match or no winner is in the current match, so an
/// unrecognized winning side never rotates the whole match out.
pub fn losers_for_winners(queue: &Queue, winning_ids: &HashSet<PlayerId>) -> HashSet<PlayerId> {
    let contestants = queue.current_match();
    if !queue.has_full_match() || !contestants.iter().any(|p| winning_ids.contains(&p.id)) {
        return HashSet::new();
    }

    contestants
        .iter()
        .filter(|p| !winning_ids.contains(&p.id))
        .map(|p| p.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::player::PlayerName;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    const T0: i64 = 1_000;
    const NOW: i64 = 5_000;

    fn player(id: &str) -> Player {
        Player::new(id, PlayerName::parse(&format!("Player {}", id)).unwrap())
    }

    fn queue_of(mode: QueueMode, ids: &[&str]) -> Queue {
        let mut queue = Queue::new("q-1", T0, mode);
        queue.players = ids.iter().map(|id| player(id)).collect();
        queue
    }

    fn ids(queue: &Queue) -> Vec<&str> {
        queue.players.iter().map(|p| p.id.as_str()).collect()
    }

    fn id_set(ids: &[&str]) -> HashSet<PlayerId> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    fn owned(ids: &[&str]) -> Vec<PlayerId> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_add_appends_to_back() {
        let queue = add(player("c"), queue_of(QueueMode::Singles, &["a", "b"]));
        assert_eq!(ids(&queue), vec!["a", "b", "c"]);
        assert!(queue.match_started_at.is_none());
    }

    #[test]
    fn test_add_is_idempotent() {
        let once = add(player("a"), queue_of(QueueMode::Singles, &[]));
        let twice = add(player("a"), once.clone());
        assert_eq!(once, twice);
        assert_eq!(ids(&twice), vec!["a"]);
    }

    #[test]
    fn test_remove_preserves_order_of_others() {
        let queue = remove("b", queue_of(QueueMode::Singles, &["a", "b", "c", "d"]));
        assert_eq!(ids(&queue), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_remove_absent_player_is_noop() {
        let before = queue_of(QueueMode::Singles, &["a", "b"]);
        let after = remove("z", before.clone());
        assert_eq!(before, after);
    }

    #[test]
    fn test_remove_leaves_no_entry_with_id() {
        for start in [&["a", "b"][..], &["b"][..], &[][..]] {
            let queue = remove("b", queue_of(QueueMode::Singles, start));
            assert!(!queue.contains("b"));
        }
    }

    #[test]
    fn test_reorder_full_order() {
        let queue = reorder(
            queue_of(QueueMode::Singles, &["a", "b", "c"]),
            &owned(&["c", "a", "b"]),
            NOW,
        );
        assert_eq!(ids(&queue), vec!["c", "a", "b"]);
        assert_eq!(queue.match_started_at, Some(NOW));
    }

    #[test]
    fn test_reorder_partial_appends_rest_in_original_order() {
        let queue = reorder(
            queue_of(QueueMode::Singles, &["a", "b", "c", "d", "e"]),
            &owned(&["d", "b"]),
            NOW,
        );
        assert_eq!(ids(&queue), vec!["d", "b", "a", "c", "e"]);
    }

    #[test]
    fn test_reorder_skips_unknown_and_repeated_ids() {
        let queue = reorder(
            queue_of(QueueMode::Singles, &["a", "b", "c"]),
            &owned(&["x", "c", "c", "y", "a"]),
            NOW,
        );
        assert_eq!(ids(&queue), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_reorder_is_a_permutation() {
        let orders: [&[&str]; 5] = [&[], &["b"], &["z", "y"], &["c", "b", "a"], &["a", "a", "q"]];

        for order in orders {
            let before = queue_of(QueueMode::Doubles, &["a", "b", "c"]);
            let after = reorder(before.clone(), &owned(order), NOW);

            let mut expected = before.player_ids();
            let mut actual = after.player_ids();
            expected.sort();
            actual.sort();
            assert_eq!(actual, expected, "order {:?}", order);
        }
    }

    #[test]
    fn test_reorder_empty_order_keeps_sequence_but_restarts_clock() {
        let queue = reorder(queue_of(QueueMode::Singles, &["a", "b"]), &[], NOW);
        assert_eq!(ids(&queue), vec!["a", "b"]);
        assert_eq!(queue.match_started_at, Some(NOW));
    }

    #[test]
    fn test_rotate_with_no_losers_is_noop() {
        let before = queue_of(QueueMode::Singles, &["a", "b", "c"]);
        let after = rotate_after_match(before.clone(), &HashSet::new(), NOW);
        assert_eq!(before, after);
    }

    #[test]
    fn test_rotate_empty_queue_is_noop() {
        let before = queue_of(QueueMode::Singles, &[]);
        let after = rotate_after_match(before.clone(), &id_set(&["a"]), NOW);
        assert_eq!(before, after);
    }

    #[test]
    fn test_rotate_under_populated_singles_is_noop() {
        let before = queue_of(QueueMode::Singles, &["a"]);
        let after = rotate_after_match(before.clone(), &id_set(&["a"]), NOW);
        assert_eq!(before, after);
    }

    #[test]
    fn test_rotate_under_populated_doubles_is_noop() {
        let before = queue_of(QueueMode::Doubles, &["a", "b", "c"]);
        let after = rotate_after_match(before.clone(), &id_set(&["a", "b"]), NOW);
        assert_eq!(before, after);
    }

    #[test]
    fn test_rotate_partitions_losers_to_back() {
        let queue = rotate_after_match(
            queue_of(QueueMode::Doubles, &["A", "B", "C", "D", "E"]),
            &id_set(&["B", "D"]),
            NOW,
        );
        assert_eq!(ids(&queue), vec!["A", "C", "E", "B", "D"]);
        assert_eq!(queue.match_started_at, Some(NOW));
    }

    #[test]
    fn test_rotate_doubles_full_match() {
        let queue = rotate_after_match(
            queue_of(QueueMode::Doubles, &["A", "B", "C", "D"]),
            &id_set(&["A", "C"]),
            NOW,
        );
        assert_eq!(ids(&queue), vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn test_singles_winner_stays_on() {
        let mut queue = Queue::new("q-1", T0, QueueMode::Singles);
        for id in ["P1", "P2", "P3"] {
            queue = add(player(id), queue);
        }
        assert_eq!(ids(&queue), vec!["P1", "P2", "P3"]);

        let queue = rotate_after_match(queue, &id_set(&["P1"]), NOW);
        assert_eq!(ids(&queue), vec!["P2", "P3", "P1"]);
    }

    #[test]
    fn test_randomize_empty_is_noop() {
        let before = queue_of(QueueMode::Singles, &[]);
        let after = randomize(before.clone(), &mut StdRng::seed_from_u64(7), NOW);
        assert_eq!(before, after);
    }

    #[test]
    fn test_randomize_preserves_multiset_and_restarts_clock() {
        let before = queue_of(QueueMode::Doubles, &["a", "b", "c", "d", "e", "f"]);
        let after = randomize(before.clone(), &mut StdRng::seed_from_u64(42), NOW);

        let mut expected = before.player_ids();
        let mut actual = after.player_ids();
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected);
        assert_eq!(after.match_started_at, Some(NOW));
    }

    #[test]
    fn test_randomize_is_uniform_over_permutations() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut counts: HashMap<Vec<PlayerId>, usize> = HashMap::new();
        let runs = 6_000;

        for _ in 0..runs {
            let queue = randomize(queue_of(QueueMode::Singles, &["a", "b", "c"]), &mut rng, NOW);
            *counts.entry(queue.player_ids()).or_default() += 1;
        }

        // 3! permutations, ~1000 each; stddev is ~29 so 800..1200 is a wide margin
        assert_eq!(counts.len(), 6);
        for (perm, count) in counts {
            assert!((800..1200).contains(&count), "{:?} seen {} times", perm, count);
        }
    }

    #[test]
    fn test_set_mode_change_restarts_clock() {
        let queue = set_mode(queue_of(QueueMode::Singles, &["a"]), QueueMode::Doubles, NOW);
        assert_eq!(queue.queue_mode, QueueMode::Doubles);
        assert_eq!(queue.match_started_at, Some(NOW));
    }

    #[test]
    fn test_set_same_mode_is_noop() {
        let before = queue_of(QueueMode::Doubles, &["a"]);
        let after = set_mode(before.clone(), QueueMode::Doubles, NOW);
        assert_eq!(before, after);
    }

    #[test]
    fn test_losers_for_winners_singles() {
        let queue = queue_of(QueueMode::Singles, &["a", "b", "c"]);
        assert_eq!(losers_for_winners(&queue, &id_set(&["a"])), id_set(&["b"]));
    }

    #[test]
    fn test_losers_for_winners_doubles_team() {
        let queue = queue_of(QueueMode::Doubles, &["a", "b", "c", "d", "e"]);
        assert_eq!(
            losers_for_winners(&queue, &id_set(&["c", "d"])),
            id_set(&["a", "b"])
        );
    }

    #[test]
    fn test_losers_for_winners_needs_a_known_winner() {
        let queue = queue_of(QueueMode::Doubles, &["a", "b", "c", "d", "e"]);

        assert!(losers_for_winners(&queue, &HashSet::new()).is_empty());
        assert!(losers_for_winners(&queue, &id_set(&["typo"])).is_empty());
        // Waiting players are not part of the match
        assert!(losers_for_winners(&queue, &id_set(&["e"])).is_empty());
    }

    #[test]
    fn test_losers_for_winners_under_populated() {
        let queue = queue_of(QueueMode::Doubles, &["a", "b"]);
        assert!(losers_for_winners(&queue, &id_set(&["a"])).is_empty());
    }
}
