use super::test_support::*;
use super::GameCoordinator;
use crate::config::ServerConfig;
use crate::directory::{GameDirectory, GameStore, InMemoryStore, StoreError};
use crate::protocol::{
    ClientMessage, ErrorCode, GameRecord, GameStatusPayload, PlayerColor, ServerMessage, SlotState,
};
use crate::validation::AcceptAllValidator;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

#[tokio::test]
async fn ping_replies_pong_and_refreshes_liveness() {
    let coordinator = create_test_coordinator().await;
    let mut client = connect(&coordinator).await;

    coordinator
        .handle_client_message(&client.id, ClientMessage::Ping)
        .await;

    assert_eq!(client.drain(), vec![ServerMessage::Pong]);
    assert!(coordinator.is_live(&client.id).await);
}

#[tokio::test]
async fn get_available_games_replies_to_sender_only() {
    let coordinator = create_test_coordinator().await;
    let mut white = connect(&coordinator).await;
    let mut asker = connect(&coordinator).await;
    let game_id = create_game(&coordinator, &mut white).await;
    asker.drain();

    coordinator
        .handle_client_message(&asker.id, ClientMessage::GetAvailableGames)
        .await;

    match asker.drain().as_slice() {
        [ServerMessage::AvailableGames(games)] => {
            assert_eq!(games.len(), 1);
            assert_eq!(games[0].game_id, game_id);
        }
        other => panic!("unexpected reply: {other:?}"),
    }
    white.assert_silent();
}

#[tokio::test]
async fn status_of_unknown_game_reports_missing() {
    let coordinator = create_test_coordinator().await;
    let mut client = connect(&coordinator).await;

    coordinator
        .handle_client_message(
            &client.id,
            ClientMessage::CheckGameStatus {
                game_id: "nope00".to_string(),
            },
        )
        .await;

    assert_eq!(
        client.drain(),
        vec![ServerMessage::GameStatus(GameStatusPayload::missing())]
    );
}

#[tokio::test]
async fn status_from_seated_player_reports_view_and_pings_opponent() {
    let coordinator = create_test_coordinator().await;
    let mut white = connect(&coordinator).await;
    let mut black = connect(&coordinator).await;
    let game_id = started_game(&coordinator, &mut white, &mut black).await;

    coordinator
        .handle_client_message(
            &black.id,
            ClientMessage::CheckGameStatus {
                game_id: game_id.clone(),
            },
        )
        .await;

    assert_eq!(
        black.drain(),
        vec![ServerMessage::GameStatus(GameStatusPayload {
            exists: true,
            is_white_player: false,
            is_black_player: true,
            game_started: true,
            white_connected: true,
            black_connected: true,
        })]
    );
    assert_eq!(white.drain(), vec![ServerMessage::OpponentReconnected]);
}

#[tokio::test]
async fn status_from_unseated_client_reports_without_notifying() {
    let coordinator = create_test_coordinator().await;
    let mut white = connect(&coordinator).await;
    let mut observer = connect(&coordinator).await;
    let game_id = create_game(&coordinator, &mut white).await;
    observer.drain();

    coordinator
        .handle_client_message(&observer.id, ClientMessage::CheckGameStatus { game_id })
        .await;

    assert_eq!(
        observer.drain(),
        vec![ServerMessage::GameStatus(GameStatusPayload {
            exists: true,
            white_connected: true,
            ..GameStatusPayload::default()
        })]
    );
    white.assert_silent();
}

#[tokio::test]
async fn handler_errors_reach_only_the_sender() {
    let coordinator = create_test_coordinator().await;
    let mut sender = connect(&coordinator).await;
    let mut bystander = connect(&coordinator).await;

    coordinator
        .handle_client_message(
            &sender.id,
            ClientMessage::JoinGame {
                game_id: "nope00".to_string(),
            },
        )
        .await;

    match sender.drain().as_slice() {
        [ServerMessage::Error {
            message,
            error_code,
        }] => {
            assert_eq!(message, "Game not found");
            assert_eq!(*error_code, Some(ErrorCode::GameNotFound));
        }
        other => panic!("unexpected reply: {other:?}"),
    }
    bystander.assert_silent();
}

#[tokio::test]
async fn disconnect_of_black_reopens_game() {
    let coordinator = create_test_coordinator().await;
    let mut white = connect(&coordinator).await;
    let mut black = connect(&coordinator).await;
    let game_id = started_game(&coordinator, &mut white, &mut black).await;

    coordinator.unregister_client(&black.id).await;

    let to_white = white.drain();
    assert_eq!(to_white[0], ServerMessage::OpponentDisconnected);
    assert!(matches!(&to_white[1], ServerMessage::AvailableGames(games) if games.len() == 1));

    let record = coordinator.game(&game_id).await.unwrap();
    assert!(record.black().is_empty());
    assert!(!record.creator_disconnected());
    assert!(!coordinator.is_live(&black.id).await);
    assert_eq!(coordinator.connected_clients(), 1);
}

#[tokio::test]
async fn disconnect_of_unmatched_creator_notifies_nobody_but_broadcasts() {
    let coordinator = create_test_coordinator().await;
    let mut creator = connect(&coordinator).await;
    let mut watcher = connect(&coordinator).await;
    let game_id = create_game(&coordinator, &mut creator).await;
    watcher.drain();

    coordinator.unregister_client(&creator.id).await;

    match watcher.drain().as_slice() {
        [ServerMessage::AvailableGames(games)] => assert_eq!(games[0].game_id, game_id),
        other => panic!("unexpected messages: {other:?}"),
    }
    let record = coordinator.game(&game_id).await.unwrap();
    assert!(record.creator_disconnected());
    assert_eq!(record.white_connection(), Some(creator.id));
}

#[tokio::test]
async fn disconnect_without_seats_is_quiet() {
    let coordinator = create_test_coordinator().await;
    let mut white = connect(&coordinator).await;
    let idle = connect(&coordinator).await;
    create_game(&coordinator, &mut white).await;

    coordinator.unregister_client(&idle.id).await;

    white.assert_silent();
}

#[tokio::test]
async fn add_test_game_confirms_then_broadcasts() {
    let coordinator = create_test_coordinator().await;
    let mut admin = connect(&coordinator).await;
    let mut watcher = connect(&coordinator).await;

    coordinator
        .handle_client_message(&admin.id, ClientMessage::AddTestGame)
        .await;

    let messages = admin.drain();
    let game_id = match &messages[0] {
        ServerMessage::TestGameAdded { game_id } => game_id.clone(),
        other => panic!("expected testGameAdded, got {other:?}"),
    };
    assert!(game_id.starts_with("test-"));
    assert!(matches!(&messages[1], ServerMessage::AvailableGames(games) if games.len() == 1));
    assert_eq!(watcher.drain().len(), 1);
}

#[tokio::test]
async fn clear_all_games_reports_count_and_broadcasts_empty_list() {
    let coordinator = create_test_coordinator().await;
    let mut admin = connect(&coordinator).await;
    let mut white = connect(&coordinator).await;
    create_game(&coordinator, &mut white).await;
    coordinator
        .handle_client_message(&admin.id, ClientMessage::AddTestGame)
        .await;
    admin.drain();
    white.drain();

    coordinator
        .handle_client_message(&admin.id, ClientMessage::ClearAllGames)
        .await;

    assert_eq!(
        admin.drain(),
        vec![
            ServerMessage::GamesCleared {
                success: true,
                count: 2
            },
            ServerMessage::AvailableGames(Vec::new()),
        ]
    );
    assert_eq!(white.drain(), vec![ServerMessage::AvailableGames(Vec::new())]);
    assert_eq!(coordinator.game_count().await, 0);
}

#[tokio::test]
async fn admin_events_can_be_disabled() {
    let config = ServerConfig {
        enable_admin_events: false,
        ..ServerConfig::default()
    };
    let coordinator = create_test_coordinator_with(config, Arc::new(AcceptAllValidator)).await;
    let mut client = connect(&coordinator).await;

    coordinator
        .handle_client_message(&client.id, ClientMessage::AddTestGame)
        .await;
    coordinator
        .handle_client_message(&client.id, ClientMessage::ClearAllGames)
        .await;

    let replies = client.drain();
    assert_eq!(replies.len(), 2);
    assert!(replies.iter().all(is_error(ErrorCode::AdminDisabled)));
    assert_eq!(coordinator.game_count().await, 0);
}

#[tokio::test]
async fn seeding_only_happens_on_empty_directory() {
    let coordinator = create_test_coordinator().await;

    let seeded = coordinator.seed_test_game_if_empty().await;
    assert!(seeded.is_some());
    assert!(coordinator.seed_test_game_if_empty().await.is_none());
    assert_eq!(coordinator.game_count().await, 1);
}

#[tokio::test]
async fn register_client_assigns_fresh_ids() {
    let coordinator = create_test_coordinator().await;
    let (tx, mut rx) = tokio::sync::mpsc::channel(4);

    let id = coordinator.register_client(tx).await;

    assert_ne!(id, Uuid::nil());
    assert!(matches!(
        rx.try_recv().unwrap().as_ref(),
        ServerMessage::AvailableGames(_)
    ));
    assert!(coordinator.is_live(&id).await);
}

/// Store whose writes take long enough to be interrupted.
struct SlowStore {
    inner: InMemoryStore,
    delay: Duration,
}

#[async_trait]
impl GameStore for SlowStore {
    async fn load(&self) -> Result<Vec<GameRecord>, StoreError> {
        self.inner.load().await
    }

    async fn save(&self, games: &[GameRecord]) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.save(games).await
    }

    fn describe(&self) -> String {
        "slow in-memory store".to_string()
    }
}

#[tokio::test]
async fn join_completes_when_caller_is_aborted_during_slow_write() {
    let store = Arc::new(SlowStore {
        inner: InMemoryStore::new(),
        delay: Duration::from_millis(300),
    });
    let coordinator = GameCoordinator::new(
        ServerConfig::default(),
        GameDirectory::new(store),
        Arc::new(AcceptAllValidator),
    );
    let mut white = connect(&coordinator).await;
    let mut black = connect(&coordinator).await;
    let game_id = create_game(&coordinator, &mut white).await;
    white.drain();
    black.drain();

    let caller = {
        let coordinator = Arc::clone(&coordinator);
        let black_id = black.id;
        let game_id = game_id.clone();
        tokio::spawn(async move {
            coordinator
                .handle_client_message(&black_id, ClientMessage::JoinGame { game_id })
                .await;
        })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    caller.abort();

    // Waits for the coordinator lock, i.e. for the join to finish.
    let record = coordinator.game(&game_id).await.unwrap();
    assert_eq!(record.black(), SlotState::Held(black.id));

    let to_white = white.drain();
    assert!(to_white
        .iter()
        .any(|m| *m == ServerMessage::GameStart { opponent_id: black.id }));
    let to_black = black.drain();
    assert!(assigned(PlayerColor::Black)(&to_black[0]));
    assert!(to_black
        .iter()
        .any(|m| *m == ServerMessage::GameStart { opponent_id: white.id }));
}
