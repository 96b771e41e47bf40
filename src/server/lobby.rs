use super::{CoordinatorState, GameCoordinator};
use crate::protocol::{ConnectionId, ServerMessage};
use std::sync::Arc;

impl GameCoordinator {
    /// Reply with the joinable games.
    pub async fn handle_get_available_games(&self, connection_id: &ConnectionId) {
        let state = self.state.lock().await;
        self.send(
            connection_id,
            ServerMessage::AvailableGames(state.directory.list_available()),
        );
    }

    /// Push the current joinable games to every open connection.
    pub(crate) fn broadcast_available_games(&self, state: &CoordinatorState) {
        let games = state.directory.list_available();
        tracing::debug!(available = games.len(), "Broadcasting available games");
        self.connection_manager
            .broadcast_all(Arc::new(ServerMessage::AvailableGames(games)));
    }
}
