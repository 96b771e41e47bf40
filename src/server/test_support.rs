use super::GameCoordinator;
use crate::config::ServerConfig;
use crate::directory::{GameDirectory, InMemoryStore};
use crate::protocol::{ConnectionId, ErrorCode, GameId, PlayerColor, ServerMessage};
use crate::validation::{AcceptAllValidator, MoveValidator};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

pub(super) struct TestClient {
    pub id: ConnectionId,
    rx: mpsc::Receiver<Arc<ServerMessage>>,
}

impl TestClient {
    /// Everything queued for this client so far.
    pub fn drain(&mut self) -> Vec<ServerMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = self.rx.try_recv() {
            messages.push(message.as_ref().clone());
        }
        messages
    }

    pub fn assert_silent(&mut self) {
        let pending = self.drain();
        assert!(pending.is_empty(), "unexpected messages: {pending:?}");
    }

    /// Re-entry token from the last `playerAssigned` among `messages`.
    pub fn token_in(messages: &[ServerMessage]) -> Option<String> {
        messages.iter().rev().find_map(|message| match message {
            ServerMessage::PlayerAssigned { reentry_token, .. } => Some(reentry_token.clone()),
            _ => None,
        })
    }
}

pub(super) async fn create_test_coordinator() -> Arc<GameCoordinator> {
    create_test_coordinator_with(ServerConfig::default(), Arc::new(AcceptAllValidator)).await
}

pub(super) async fn create_test_coordinator_with(
    config: ServerConfig,
    validator: Arc<dyn MoveValidator>,
) -> Arc<GameCoordinator> {
    let directory = GameDirectory::new(Arc::new(InMemoryStore::new()));
    GameCoordinator::new(config, directory, validator)
}

pub(super) async fn create_coordinator_on_store(store: Arc<InMemoryStore>) -> Arc<GameCoordinator> {
    GameCoordinator::from_store(
        ServerConfig::default(),
        store,
        Arc::new(AcceptAllValidator),
    )
    .await
}

/// Connect a client and discard its greeting.
pub(super) async fn connect(coordinator: &GameCoordinator) -> TestClient {
    let id = Uuid::new_v4();
    let (tx, rx) = mpsc::channel(64);
    coordinator.connect_client(id, tx).await;
    let mut client = TestClient { id, rx };
    let greeting = client.drain();
    assert!(
        matches!(greeting.as_slice(), [ServerMessage::AvailableGames(_)]),
        "expected availableGames greeting, got {greeting:?}"
    );
    client
}

/// Create a game as `creator` and return its id, draining the creator's
/// confirmation messages.
pub(super) async fn create_game(coordinator: &GameCoordinator, creator: &mut TestClient) -> GameId {
    coordinator.handle_create_game(&creator.id).await;
    let messages = creator.drain();
    messages
        .iter()
        .find_map(|message| match message {
            ServerMessage::GameCreated { game_id } => Some(game_id.clone()),
            _ => None,
        })
        .expect("gameCreated sent to creator")
}

/// Create a game and seat a second player as black; drains both clients.
pub(super) async fn started_game(
    coordinator: &GameCoordinator,
    white: &mut TestClient,
    black: &mut TestClient,
) -> GameId {
    let game_id = create_game(coordinator, white).await;
    coordinator
        .handle_join_game(&black.id, game_id.clone())
        .await
        .expect("join succeeds");
    white.drain();
    black.drain();
    game_id
}

pub(super) fn assigned(color: PlayerColor) -> impl Fn(&ServerMessage) -> bool {
    move |message| matches!(message, ServerMessage::PlayerAssigned { color: c, .. } if *c == color)
}

pub(super) fn is_error(code: ErrorCode) -> impl Fn(&ServerMessage) -> bool {
    move |message| matches!(message, ServerMessage::Error { error_code: Some(c), .. } if *c == code)
}
