use super::GameCoordinator;
use crate::protocol::{ConnectionId, ServerMessage};

impl GameCoordinator {
    /// Tear down a connection: mark it not live, drop its outbound channel
    /// and release every seat it holds.
    ///
    /// A released white seat keeps the creator's id and becomes open for
    /// takeover; a released black seat is vacated.
    pub async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        state.registry.on_disconnect(*connection_id);
        self.connection_manager.unregister(connection_id);

        let released = state.directory.release_connection(connection_id).await;

        for before in &released {
            let Some(color) = before.color_of(connection_id) else {
                continue;
            };
            tracing::info!(%connection_id, game_id = %before.id, %color, "Seat released on disconnect");

            if let Some(opponent) = before
                .opponent_of(color)
                .filter(|id| id != connection_id && state.registry.is_live(id))
            {
                self.send(&opponent, ServerMessage::OpponentDisconnected);
            }
        }

        if !released.is_empty() {
            self.broadcast_available_games(state);
        }

        tracing::info!(
            %connection_id,
            games_affected = released.len(),
            live_connections = state.registry.live_count(),
            "Client disconnected"
        );
    }
}
