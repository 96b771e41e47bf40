use super::{CoordinatorError, GameCoordinator};
use crate::protocol::{ConnectionId, GameId, ServerMessage};
use uuid::Uuid;

impl GameCoordinator {
    /// Insert a synthetic open game whose white seat belongs to a connection
    /// that never existed, so any joiner takes it over.
    pub async fn handle_add_test_game(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<(), CoordinatorError> {
        if !self.config.enable_admin_events {
            return Err(CoordinatorError::AdminDisabled);
        }

        let mut state = self.state.lock().await;
        let record = state.directory.create_test_game(Uuid::new_v4()).await;
        tracing::info!(%connection_id, game_id = %record.id, "Test game added");

        self.send(
            connection_id,
            ServerMessage::TestGameAdded {
                game_id: record.id,
            },
        );
        self.broadcast_available_games(&state);
        Ok(())
    }

    /// Remove every game along with its re-entry tokens and move history.
    pub async fn handle_clear_all_games(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<(), CoordinatorError> {
        if !self.config.enable_admin_events {
            return Err(CoordinatorError::AdminDisabled);
        }

        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        let count = state.directory.clear().await;
        state.tokens.clear();
        state.histories.clear();
        tracing::info!(%connection_id, count, "All games cleared");

        self.send(
            connection_id,
            ServerMessage::GamesCleared {
                success: true,
                count,
            },
        );
        self.broadcast_available_games(state);
        Ok(())
    }

    /// Add a test game when the directory is empty. Used at startup.
    pub async fn seed_test_game_if_empty(&self) -> Option<GameId> {
        let mut state = self.state.lock().await;
        if !state.directory.is_empty() {
            return None;
        }

        let record = state.directory.create_test_game(Uuid::new_v4()).await;
        tracing::info!(game_id = %record.id, "No games found; seeded a test game");
        self.broadcast_available_games(&state);
        Some(record.id)
    }
}
