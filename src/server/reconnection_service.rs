use super::{CoordinatorError, CoordinatorState, GameCoordinator};
use crate::protocol::{ConnectionId, GameId, GameRecord, PlayerColor, SlotState};

impl GameCoordinator {
    /// Re-seat a returning player.
    ///
    /// A presented re-entry token binds the request to one seat. Without a
    /// token the first claimant of an abandoned or stale seat wins, and a
    /// still-open black seat is filled as in a regular join.
    pub async fn handle_reconnect_to_game(
        &self,
        connection_id: &ConnectionId,
        game_id: GameId,
        reentry_token: Option<String>,
    ) -> Result<(), CoordinatorError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        state.registry.touch(*connection_id);

        let record = state
            .directory
            .get(&game_id)
            .cloned()
            .ok_or_else(|| CoordinatorError::NotFound(game_id.clone()))?;

        if let Some(token) = reentry_token {
            return self
                .reconnect_with_token(state, record, connection_id, &token)
                .await;
        }

        if self.config.require_reentry_token {
            return Err(CoordinatorError::ReentryTokenRequired(game_id));
        }

        if record.creator_disconnected() && !record.black().is_held_by(connection_id) {
            tracing::info!(%connection_id, %game_id, "Reconnect takes over abandoned white seat");
            self.claim_seat(state, record, PlayerColor::White, connection_id, true)
                .await;
            self.broadcast_available_games(state);
            return Ok(());
        }

        if let Some(color) = record.color_of(connection_id) {
            tracing::debug!(%connection_id, %game_id, %color, "Reconnect from seated player; nothing to do");
            return Ok(());
        }

        if is_stale(state, record.white()) {
            tracing::info!(%connection_id, %game_id, "Reconnect claims stale white seat");
            self.claim_seat(state, record, PlayerColor::White, connection_id, true)
                .await;
            self.broadcast_available_games(state);
            return Ok(());
        }

        if is_stale(state, record.black()) {
            tracing::info!(%connection_id, %game_id, "Reconnect claims stale black seat");
            self.claim_seat(state, record, PlayerColor::Black, connection_id, true)
                .await;
            self.broadcast_available_games(state);
            return Ok(());
        }

        if record.black().is_empty() {
            tracing::info!(%connection_id, %game_id, "Reconnect fills open black seat; starting game");
            let updated = self
                .claim_seat(state, record, PlayerColor::Black, connection_id, false)
                .await;
            self.start_game(&updated);
            self.broadcast_available_games(state);
            return Ok(());
        }

        Err(CoordinatorError::GameFull(game_id))
    }

    async fn reconnect_with_token(
        &self,
        state: &mut CoordinatorState,
        record: GameRecord,
        connection_id: &ConnectionId,
        token: &str,
    ) -> Result<(), CoordinatorError> {
        let game_id = record.id.clone();
        let Some(color) = state.tokens.validate(token, &game_id) else {
            return Err(CoordinatorError::InvalidReentryToken(game_id));
        };

        if let Some(seated) = record.color_of(connection_id) {
            tracing::debug!(%connection_id, %game_id, %color, %seated, "Token holder already seated");
            return Ok(());
        }

        let slot = record.slot(color);

        let claimable = match slot {
            SlotState::Empty | SlotState::PendingTakeover(_) => true,
            SlotState::Held(holder) => !state.registry.is_live(&holder),
        };
        if !claimable {
            return Err(CoordinatorError::SlotOccupied { game_id, color });
        }

        let black_was_empty = record.black().is_empty();
        tracing::info!(%connection_id, %game_id, %color, "Reconnect reclaims seat with re-entry token");
        let updated = self
            .claim_seat(state, record, color, connection_id, true)
            .await;
        if black_was_empty && updated.is_started() {
            self.start_game(&updated);
        }
        self.broadcast_available_games(state);
        Ok(())
    }
}

/// Held by a connection the registry no longer considers live.
fn is_stale(state: &CoordinatorState, slot: SlotState) -> bool {
    matches!(slot, SlotState::Held(holder) if !state.registry.is_live(&holder))
}
