use std::sync::Arc;

use crate::protocol::{ClientMessage, ConnectionId};

use super::GameCoordinator;

impl GameCoordinator {
    /// Dispatch one inbound event. Failures become an `error` message to the
    /// sender and never reach other connections.
    ///
    /// The event runs on its own task, so once started it completes even if
    /// the caller is cancelled mid-transition.
    pub async fn handle_client_message(
        self: &Arc<Self>,
        connection_id: &ConnectionId,
        message: ClientMessage,
    ) {
        let coordinator = Arc::clone(self);
        let connection_id = *connection_id;
        let handle =
            tokio::spawn(async move { coordinator.dispatch(&connection_id, message).await });

        if let Err(err) = handle.await {
            tracing::error!(%connection_id, error = %err, "Client event handler failed");
        }
    }

    async fn dispatch(&self, connection_id: &ConnectionId, message: ClientMessage) {
        tracing::debug!(%connection_id, event = message.event_name(), "Handling client event");

        let result = match message {
            ClientMessage::CreateGame => {
                self.handle_create_game(connection_id).await;
                Ok(())
            }
            ClientMessage::JoinGame { game_id } => {
                self.handle_join_game(connection_id, game_id).await
            }
            ClientMessage::Move {
                game_id,
                chess_move,
            } => self.handle_move(connection_id, game_id, chess_move).await,
            ClientMessage::GetAvailableGames => {
                self.handle_get_available_games(connection_id).await;
                Ok(())
            }
            ClientMessage::CheckGameStatus { game_id } => {
                self.handle_check_game_status(connection_id, game_id).await;
                Ok(())
            }
            ClientMessage::ReconnectToGame {
                game_id,
                reentry_token,
            } => {
                self.handle_reconnect_to_game(connection_id, game_id, reentry_token)
                    .await
            }
            ClientMessage::AddTestGame => self.handle_add_test_game(connection_id).await,
            ClientMessage::ClearAllGames => self.handle_clear_all_games(connection_id).await,
            ClientMessage::Ping => {
                self.handle_ping(connection_id).await;
                Ok(())
            }
        };

        if let Err(err) = result {
            self.report_error(connection_id, &err);
        }
    }
}
