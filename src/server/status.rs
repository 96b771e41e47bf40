use super::GameCoordinator;
use crate::protocol::{ConnectionId, GameId, GameStatusPayload, ServerMessage};

impl GameCoordinator {
    /// Report the sender's view of a game and refresh its liveness.
    ///
    /// A seated sender also announces itself to a connected opponent.
    pub async fn handle_check_game_status(&self, connection_id: &ConnectionId, game_id: GameId) {
        let mut state = self.state.lock().await;
        state.registry.touch(*connection_id);

        let Some(record) = state.directory.get(&game_id) else {
            tracing::debug!(%connection_id, %game_id, "Status check for unknown game");
            self.send(
                connection_id,
                ServerMessage::GameStatus(GameStatusPayload::missing()),
            );
            return;
        };

        let is_white_player = record.white().is_held_by(connection_id);
        let is_black_player = record.black().is_held_by(connection_id);
        let white_connected =
            is_white_player || state.registry.is_live_opt(record.white_connection());
        let black_connected =
            is_black_player || state.registry.is_live_opt(record.black_connection());

        if let Some(color) = record.color_of(connection_id) {
            if let Some(opponent) = record
                .opponent_of(color)
                .filter(|id| state.registry.is_live(id))
            {
                tracing::debug!(%connection_id, %game_id, %opponent, "Announcing seated player to opponent");
                self.send(&opponent, ServerMessage::OpponentReconnected);
            }
        }

        self.send(
            connection_id,
            ServerMessage::GameStatus(GameStatusPayload {
                exists: true,
                is_white_player,
                is_black_player,
                game_started: record.is_started(),
                white_connected,
                black_connected,
            }),
        );
    }

    /// Liveness heartbeat.
    pub async fn handle_ping(&self, connection_id: &ConnectionId) {
        self.state.lock().await.registry.touch(*connection_id);
        self.send(connection_id, ServerMessage::Pong);
    }
}
