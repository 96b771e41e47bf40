use super::{CoordinatorError, CoordinatorState, GameCoordinator};
use crate::protocol::{ConnectionId, GameId, GameRecord, PlayerColor, ServerMessage};

impl GameCoordinator {
    /// Create a game with the sender as white.
    pub async fn handle_create_game(&self, connection_id: &ConnectionId) {
        let mut state = self.state.lock().await;

        let record = state.directory.create(*connection_id).await;
        let reentry_token = state.tokens.issue(&record.id, PlayerColor::White);

        tracing::info!(%connection_id, game_id = %record.id, "Game created");

        self.send(
            connection_id,
            ServerMessage::GameCreated {
                game_id: record.id.clone(),
            },
        );
        self.send(
            connection_id,
            ServerMessage::PlayerAssigned {
                color: PlayerColor::White,
                reentry_token,
            },
        );
        self.broadcast_available_games(&state);
    }

    /// Seat the sender in an existing game.
    ///
    /// Resolution order: unknown id, sender already seated, abandoned creator
    /// seat, full game, stale creator seat, and finally the black seat. The
    /// two white takeovers are refused for token-owned seats when re-entry
    /// tokens are required.
    pub async fn handle_join_game(
        &self,
        connection_id: &ConnectionId,
        game_id: GameId,
    ) -> Result<(), CoordinatorError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        let record = state
            .directory
            .get(&game_id)
            .cloned()
            .ok_or_else(|| CoordinatorError::NotFound(game_id.clone()))?;

        if let Some(color) = record.color_of(connection_id) {
            tracing::debug!(%connection_id, %game_id, %color, "Join from seated player; re-sending seat");
            let reentry_token = state.tokens.issue(&game_id, color);
            self.send(
                connection_id,
                ServerMessage::PlayerAssigned {
                    color,
                    reentry_token,
                },
            );
            return Ok(());
        }

        if record.creator_disconnected() {
            self.ensure_unowned(state, &game_id, PlayerColor::White)?;
            tracing::info!(%connection_id, %game_id, "Taking over abandoned white seat");
            self.claim_seat(state, record, PlayerColor::White, connection_id, true)
                .await;
            self.broadcast_available_games(state);
            return Ok(());
        }

        if !record.black().is_empty() {
            return Err(CoordinatorError::GameFull(game_id));
        }

        if !state.registry.is_live_opt(record.white_connection()) {
            self.ensure_unowned(state, &game_id, PlayerColor::White)?;
            tracing::info!(
                %connection_id,
                %game_id,
                stale_white = ?record.white_connection(),
                "White holder is not connected; taking over white seat"
            );
            self.claim_seat(state, record, PlayerColor::White, connection_id, true)
                .await;
            self.broadcast_available_games(state);
            return Ok(());
        }

        let updated = self
            .claim_seat(state, record, PlayerColor::Black, connection_id, false)
            .await;
        tracing::info!(%connection_id, %game_id, "Joined as black; starting game");
        self.start_game(&updated);
        self.broadcast_available_games(state);
        Ok(())
    }

    /// With `require_reentry_token`, a seat whose player holds a current
    /// token can only be reclaimed through `reconnectToGame` with that token.
    fn ensure_unowned(
        &self,
        state: &CoordinatorState,
        game_id: &GameId,
        color: PlayerColor,
    ) -> Result<(), CoordinatorError> {
        if self.config.require_reentry_token && state.tokens.is_owned(game_id, color) {
            return Err(CoordinatorError::SlotOccupied {
                game_id: game_id.clone(),
                color,
            });
        }
        Ok(())
    }

    /// Put `connection_id` into `color`, persist, issue a fresh re-entry token
    /// and send `playerAssigned`. With `notify_opponent`, a live opponent is
    /// told `opponentReconnected`. Returns the updated record.
    pub(crate) async fn claim_seat(
        &self,
        state: &mut CoordinatorState,
        mut record: GameRecord,
        color: PlayerColor,
        connection_id: &ConnectionId,
        notify_opponent: bool,
    ) -> GameRecord {
        record.assign(color, *connection_id);
        state.directory.put(record.clone()).await;

        let reentry_token = state.tokens.issue(&record.id, color);
        self.send(
            connection_id,
            ServerMessage::PlayerAssigned {
                color,
                reentry_token,
            },
        );

        if notify_opponent {
            if let Some(opponent) = record
                .opponent_of(color)
                .filter(|id| id != connection_id && state.registry.is_live(id))
            {
                self.send(&opponent, ServerMessage::OpponentReconnected);
            }
        }

        record
    }

    /// Send `gameStart` to white, then to black, each naming the other.
    pub(crate) fn start_game(&self, record: &GameRecord) {
        let (Some(white), Some(black)) = (record.white_connection(), record.black_connection())
        else {
            return;
        };
        self.send(&white, ServerMessage::GameStart { opponent_id: black });
        self.send(&black, ServerMessage::GameStart { opponent_id: white });
    }
}
