//! Integration tests for the room layer: seating, resume, spectating,
//! intent routing, and registry sweeping.

use std::time::Duration;

use landgrab_protocol::{
    ClientIntent, Lifecycle, PlayerId, PrivateView, PublicView, RoomCode, ServerFrame,
};
use landgrab_room::{ConnId, RoomError, RoomHandle, RoomRegistry, RoomsConfig};
use tokio::sync::mpsc;

type FrameRx = mpsc::UnboundedReceiver<ServerFrame>;

// =========================================================================
// Helpers
// =========================================================================

fn registry() -> RoomRegistry {
    RoomRegistry::new(RoomsConfig {
        seed: Some(7),
        ..RoomsConfig::default()
    })
}

async fn join(handle: &RoomHandle, name: &str) -> (ConnId, PlayerId, FrameRx) {
    let (tx, rx) = mpsc::unbounded_channel();
    let (conn, player) = handle
        .join(name.to_string(), false, tx)
        .await
        .expect("join failed");
    (conn, player, rx)
}

/// Waits until every previously queued command has been processed.
///
/// The actor handles commands in order, so once `info` answers, all
/// frames from earlier intents are sitting in their channels.
async fn settle(handle: &RoomHandle) {
    handle.info().await.expect("room stopped answering");
}

fn drain(rx: &mut FrameRx) -> Vec<ServerFrame> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(frame);
    }
    frames
}

fn last_state(frames: &[ServerFrame]) -> (&PublicView, Option<&PrivateView>) {
    frames
        .iter()
        .rev()
        .find_map(|frame| match frame {
            ServerFrame::State {
                public, private, ..
            } => Some((public, private.as_ref())),
            _ => None,
        })
        .expect("no state frame received")
}

/// Drains a channel and keeps only the most recent state snapshot.
fn latest_state(rx: &mut FrameRx) -> (PublicView, Option<PrivateView>) {
    let frames = drain(rx);
    let (public, private) = last_state(&frames);
    (public.clone(), private.cloned())
}

fn errors(frames: &[ServerFrame]) -> Vec<&str> {
    frames
        .iter()
        .filter_map(|frame| match frame {
            ServerFrame::Error { message } => Some(message.as_str()),
            _ => None,
        })
        .collect()
}

/// Readies both seats and starts the match (first join is the host).
async fn ready_and_start(handle: &RoomHandle, host: ConnId, other: ConnId) {
    handle.intent(host, ClientIntent::Ready).await.unwrap();
    handle.intent(other, ClientIntent::Ready).await.unwrap();
    handle.intent(host, ClientIntent::Start).await.unwrap();
    settle(handle).await;
}

// =========================================================================
// Seating and broadcast
// =========================================================================

#[tokio::test]
async fn test_join_broadcasts_lobby_state_to_everyone() {
    let mut reg = registry();
    let handle = reg.create_room();

    let (_, _, mut alice_rx) = join(&handle, "Alice").await;
    let (public, private) = latest_state(&mut alice_rx);
    assert_eq!(public.state, Lifecycle::Lobby);
    assert_eq!(public.players.len(), 1);
    assert!(private.is_some(), "seated connections get a private view");

    let (_, _, mut bob_rx) = join(&handle, "Bob").await;

    // Both channels see the two-seat lobby.
    let (public, _) = latest_state(&mut alice_rx);
    assert_eq!(public.players.len(), 2);
    let (public, private) = latest_state(&mut bob_rx);
    assert_eq!(public.players.len(), 2);
    assert!(private.expect("private view").hand.is_empty());
}

#[tokio::test]
async fn test_start_deals_hands_to_the_right_seats() {
    let mut reg = registry();
    let handle = reg.create_room();
    let (alice_conn, alice, mut alice_rx) = join(&handle, "Alice").await;
    let (bob_conn, bob, mut bob_rx) = join(&handle, "Bob").await;

    ready_and_start(&handle, alice_conn, bob_conn).await;

    let alice_frames = drain(&mut alice_rx);
    let bob_frames = drain(&mut bob_rx);
    let (public, alice_private) = last_state(&alice_frames);
    let (_, bob_private) = last_state(&bob_frames);

    assert_eq!(public.state, Lifecycle::Playing);
    assert_eq!(public.turn_order.len(), 2);
    let current = public.current_player.expect("someone's turn");

    // Five cards each, plus the first player's two-card turn draw.
    let alice_hand = alice_private.expect("private view").hand.len();
    let bob_hand = bob_private.expect("private view").hand.len();
    if current == alice {
        assert_eq!((alice_hand, bob_hand), (7, 5));
    } else {
        assert_eq!(current, bob);
        assert_eq!((alice_hand, bob_hand), (5, 7));
    }
}

#[tokio::test]
async fn test_non_host_start_errors_on_that_connection_only() {
    let mut reg = registry();
    let handle = reg.create_room();
    let (_, _, mut alice_rx) = join(&handle, "Alice").await;
    let (bob_conn, _, mut bob_rx) = join(&handle, "Bob").await;
    drain(&mut alice_rx);
    drain(&mut bob_rx);

    handle.intent(bob_conn, ClientIntent::Start).await.unwrap();
    settle(&handle).await;

    let bob_frames = drain(&mut bob_rx);
    assert_eq!(errors(&bob_frames), vec!["only the host can do that"]);
    // The rejected intent still re-broadcasts state to everyone.
    let (public, _) = last_state(&bob_frames);
    assert_eq!(public.state, Lifecycle::Lobby);
    let alice_frames = drain(&mut alice_rx);
    assert!(errors(&alice_frames).is_empty());
}

#[tokio::test]
async fn test_wrong_turn_intent_errors_and_rebroadcasts() {
    let mut reg = registry();
    let handle = reg.create_room();
    let (alice_conn, alice, mut alice_rx) = join(&handle, "Alice").await;
    let (bob_conn, _, mut bob_rx) = join(&handle, "Bob").await;
    ready_and_start(&handle, alice_conn, bob_conn).await;

    let (public, _) = latest_state(&mut alice_rx);
    let current = public.current_player.expect("someone's turn");
    let idle_conn = if current == alice { bob_conn } else { alice_conn };
    let idle_rx = if current == alice {
        &mut bob_rx
    } else {
        &mut alice_rx
    };
    drain(idle_rx);

    handle.intent(idle_conn, ClientIntent::EndTurn).await.unwrap();
    settle(&handle).await;

    let frames = drain(idle_rx);
    assert_eq!(errors(&frames), vec!["not your turn"]);
    let (public, _) = last_state(&frames);
    assert_eq!(public.current_player, Some(current));
}

#[tokio::test]
async fn test_end_turn_rotates_to_the_other_seat() {
    let mut reg = registry();
    let handle = reg.create_room();
    let (alice_conn, alice, mut alice_rx) = join(&handle, "Alice").await;
    let (bob_conn, bob, _bob_rx) = join(&handle, "Bob").await;
    ready_and_start(&handle, alice_conn, bob_conn).await;

    let (public, _) = latest_state(&mut alice_rx);
    let current = public.current_player.expect("someone's turn");
    let (current_conn, next) = if current == alice {
        (alice_conn, bob)
    } else {
        (bob_conn, alice)
    };

    handle
        .intent(current_conn, ClientIntent::EndTurn)
        .await
        .unwrap();
    settle(&handle).await;

    let (public, _) = latest_state(&mut alice_rx);
    assert_eq!(public.current_player, Some(next));
    assert_eq!(public.cards_played, 0);
}

#[tokio::test]
async fn test_room_level_intents_rejected_once_bound() {
    let mut reg = registry();
    let handle = reg.create_room();
    let (conn, _, mut rx) = join(&handle, "Alice").await;
    drain(&mut rx);

    handle
        .intent(
            conn,
            ClientIntent::Create {
                name: "Again".into(),
                display: false,
            },
        )
        .await
        .unwrap();
    settle(&handle).await;

    let frames = drain(&mut rx);
    assert_eq!(errors(&frames), vec!["this connection is already in a room"]);
    // Nothing changed, so nothing re-broadcast.
    assert_eq!(frames.len(), 1);
}

// =========================================================================
// Detach, resume, spectate
// =========================================================================

#[tokio::test]
async fn test_detached_seat_survives_and_rebinds() {
    let mut reg = registry();
    let handle = reg.create_room();
    let (_, _, mut alice_rx) = join(&handle, "Alice").await;
    let (bob_conn, bob, mut bob_rx) = join(&handle, "Bob").await;
    drain(&mut alice_rx);
    drain(&mut bob_rx);

    handle.detach(bob_conn).await;
    settle(&handle).await;
    assert!(drain(&mut bob_rx).is_empty(), "detach sends nothing");

    let info = handle.info().await.unwrap();
    assert_eq!(info.seats, 2, "the seat outlives its connection");
    assert_eq!(info.connections, 1);

    let (tx, mut rx2) = mpsc::unbounded_channel();
    handle.rebind(bob, tx).await.expect("rebind failed");

    let (public, private) = latest_state(&mut rx2);
    assert_eq!(public.players.len(), 2);
    assert!(private.is_some());
}

#[tokio::test]
async fn test_rebind_replaces_the_old_connection() {
    let mut reg = registry();
    let handle = reg.create_room();
    let (_, alice, mut rx1) = join(&handle, "Alice").await;
    drain(&mut rx1);

    let (tx, mut rx2) = mpsc::unbounded_channel();
    handle.rebind(alice, tx).await.expect("rebind failed");

    let info = handle.info().await.unwrap();
    assert_eq!(info.connections, 1, "old connection was dropped");
    assert!(drain(&mut rx1).is_empty());
    assert!(!drain(&mut rx2).is_empty());
}

#[tokio::test]
async fn test_rebind_refuses_unknown_seat() {
    let mut reg = registry();
    let handle = reg.create_room();
    let (tx, _rx) = mpsc::unbounded_channel();

    let result = handle.rebind(PlayerId::new(4242), tx).await;
    assert!(matches!(result, Err(RoomError::UnknownSeat(_))));
}

#[tokio::test]
async fn test_spectator_sees_public_view_only() {
    let mut reg = registry();
    let handle = reg.create_room();
    let (_, _, _alice_rx) = join(&handle, "Alice").await;

    let (tx, mut spect_rx) = mpsc::unbounded_channel();
    let spect_conn = handle.spectate(tx).await.expect("spectate failed");

    let frames = drain(&mut spect_rx);
    let (public, private) = last_state(&frames);
    assert_eq!(public.players.len(), 1);
    assert!(private.is_none(), "spectators never see a private view");

    handle.intent(spect_conn, ClientIntent::Ready).await.unwrap();
    settle(&handle).await;
    assert_eq!(errors(&drain(&mut spect_rx)), vec!["spectators can only watch"]);
}

// =========================================================================
// Registry
// =========================================================================

#[tokio::test]
async fn test_registry_resolves_codes_case_insensitively() {
    let mut reg = registry();
    let handle = reg.create_room();
    let lower = handle.code().as_str().to_ascii_lowercase();

    let found = reg.lookup(&RoomCode::new(lower)).expect("lookup failed");
    assert_eq!(found.code(), handle.code());

    let missing = reg.lookup(&RoomCode::new("ZZZZ9"));
    assert!(matches!(missing, Err(RoomError::NotFound(_))));
}

#[tokio::test]
async fn test_create_room_assigns_distinct_codes() {
    let mut reg = registry();
    let a = reg.create_room();
    let b = reg.create_room();
    assert_ne!(a.code(), b.code());
    assert_eq!(reg.room_count(), 2);
}

#[tokio::test]
async fn test_sweep_evicts_rooms_with_no_connections() {
    let mut reg = RoomRegistry::new(RoomsConfig {
        evict_after: Duration::ZERO,
        ..RoomsConfig::default()
    });
    let handle = reg.create_room();
    let code = handle.code().clone();

    let evicted = reg.sweep().await;
    assert_eq!(evicted, vec![code]);
    assert_eq!(reg.room_count(), 0);

    // The evicted actor is gone; its handle goes dark.
    let result = handle.info().await;
    assert!(matches!(result, Err(RoomError::Unavailable(_))));
}

#[tokio::test]
async fn test_sweep_keeps_rooms_with_live_connections() {
    let mut reg = RoomRegistry::new(RoomsConfig {
        evict_after: Duration::ZERO,
        ..RoomsConfig::default()
    });
    let handle = reg.create_room();
    let (conn, _, _rx) = join(&handle, "Alice").await;

    assert!(reg.sweep().await.is_empty());
    assert_eq!(reg.room_count(), 1);

    // Once the last connection detaches, the room is fair game.
    handle.detach(conn).await;
    settle(&handle).await;
    let evicted = reg.sweep().await;
    assert_eq!(evicted.len(), 1);
    assert_eq!(reg.room_count(), 0);
}
