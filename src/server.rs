use crate::config::ServerConfig;
use crate::directory::{GameDirectory, GameStore};
use crate::protocol::{
    AvailableGame, ConnectionId, ErrorCode, GameId, GameRecord, PlayerColor, ServerMessage,
};
use crate::reconnection::ReentryTokens;
use crate::registry::ConnectionRegistry;
use crate::validation::{MoveValidator, RelayedMove};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;

mod admin;
mod connection_manager;
mod disconnect;
mod game_service;
mod lobby;
mod message_router;
#[cfg(test)]
mod message_router_tests;
mod messaging;
mod move_relay;
mod reconnection_service;
mod status;
#[cfg(test)]
mod test_support;

use connection_manager::ConnectionManager;

/// Recoverable handler failures. Each one is reported to the originating
/// connection only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    #[error("Game not found")]
    NotFound(GameId),
    #[error("Game is full")]
    GameFull(GameId),
    #[error("Move rejected")]
    MoveRejected(GameId),
    #[error("Invalid re-entry token")]
    InvalidReentryToken(GameId),
    #[error("A re-entry token is required to reconnect")]
    ReentryTokenRequired(GameId),
    #[error("The {color} seat is held by another player")]
    SlotOccupied { game_id: GameId, color: PlayerColor },
    #[error("Administrative events are disabled")]
    AdminDisabled,
}

impl CoordinatorError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::GameNotFound,
            Self::GameFull(_) => ErrorCode::GameFull,
            Self::MoveRejected(_) => ErrorCode::MoveRejected,
            Self::InvalidReentryToken(_) => ErrorCode::ReentryTokenInvalid,
            Self::ReentryTokenRequired(_) => ErrorCode::ReentryTokenRequired,
            Self::SlotOccupied { .. } => ErrorCode::SlotOccupied,
            Self::AdminDisabled => ErrorCode::AdminDisabled,
        }
    }

    /// Game the failure refers to, if any.
    #[must_use]
    pub fn game_id(&self) -> Option<&str> {
        match self {
            Self::NotFound(id)
            | Self::GameFull(id)
            | Self::MoveRejected(id)
            | Self::InvalidReentryToken(id)
            | Self::ReentryTokenRequired(id)
            | Self::SlotOccupied { game_id: id, .. } => Some(id),
            Self::AdminDisabled => None,
        }
    }
}

/// Everything a transition reads or writes. Guarded by one lock so that each
/// event runs to completion before the next one starts.
pub(crate) struct CoordinatorState {
    pub directory: GameDirectory,
    pub registry: ConnectionRegistry,
    pub tokens: ReentryTokens,
    /// Accepted moves per game, in relay order.
    pub histories: HashMap<GameId, Vec<RelayedMove>>,
}

/// Matchmaking and relay coordinator for two-player chess games.
pub struct GameCoordinator {
    state: Mutex<CoordinatorState>,
    /// Outbound channels of every open connection
    connection_manager: ConnectionManager,
    config: ServerConfig,
    validator: Arc<dyn MoveValidator>,
}

impl GameCoordinator {
    pub fn new(
        config: ServerConfig,
        directory: GameDirectory,
        validator: Arc<dyn MoveValidator>,
    ) -> Arc<Self> {
        tracing::info!(
            games = directory.len(),
            require_reentry_token = config.require_reentry_token,
            enable_admin_events = config.enable_admin_events,
            "Game coordinator initialized"
        );

        Arc::new(Self {
            state: Mutex::new(CoordinatorState {
                directory,
                registry: ConnectionRegistry::new(),
                tokens: ReentryTokens::new(),
                histories: HashMap::new(),
            }),
            connection_manager: ConnectionManager::new(),
            config,
            validator,
        })
    }

    /// Load the persisted directory from `store` and build a coordinator on it.
    pub async fn from_store(
        config: ServerConfig,
        store: Arc<dyn GameStore>,
        validator: Arc<dyn MoveValidator>,
    ) -> Arc<Self> {
        let directory = GameDirectory::load(store).await;
        Self::new(config, directory, validator)
    }

    /// Register a new connection under a fresh id and greet it with the
    /// current available games.
    pub async fn register_client(&self, sender: mpsc::Sender<Arc<ServerMessage>>) -> ConnectionId {
        let connection_id = Uuid::new_v4();
        self.connect_client(connection_id, sender).await;
        connection_id
    }

    /// Register a connection with a caller-chosen id.
    pub async fn connect_client(
        &self,
        connection_id: ConnectionId,
        sender: mpsc::Sender<Arc<ServerMessage>>,
    ) {
        let mut state = self.state.lock().await;
        state.registry.on_connect(connection_id);
        self.connection_manager.register(connection_id, sender);

        self.connection_manager.send_to(
            &connection_id,
            Arc::new(ServerMessage::AvailableGames(
                state.directory.list_available(),
            )),
        );
        tracing::info!(%connection_id, "Client connected");
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Copy of a game record, if present.
    pub async fn game(&self, game_id: &str) -> Option<GameRecord> {
        self.state.lock().await.directory.get(game_id).cloned()
    }

    pub async fn available_games(&self) -> Vec<AvailableGame> {
        self.state.lock().await.directory.list_available()
    }

    /// Copies of every game record, in creation order.
    pub async fn games(&self) -> Vec<GameRecord> {
        self.state.lock().await.directory.records().cloned().collect()
    }

    pub async fn game_count(&self) -> usize {
        self.state.lock().await.directory.len()
    }

    pub async fn is_live(&self, connection_id: &ConnectionId) -> bool {
        self.state.lock().await.registry.is_live(connection_id)
    }

    /// Accepted moves relayed so far in `game_id`.
    pub async fn move_history(&self, game_id: &str) -> Vec<RelayedMove> {
        self.state
            .lock()
            .await
            .histories
            .get(game_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of connections with an open outbound channel.
    pub fn connected_clients(&self) -> usize {
        self.connection_manager.len()
    }
}
