use super::{CoordinatorError, GameCoordinator};
use crate::protocol::{ConnectionId, GameId, ServerMessage};
use crate::validation::{MoveContext, RelayedMove};
use serde_json::Value;

impl GameCoordinator {
    /// Validate a move once and relay it verbatim to the other seat.
    ///
    /// Moves from connections that hold no seat in the game are dropped
    /// without a reply.
    pub async fn handle_move(
        &self,
        connection_id: &ConnectionId,
        game_id: GameId,
        chess_move: Value,
    ) -> Result<(), CoordinatorError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        let record = state
            .directory
            .get(&game_id)
            .ok_or_else(|| CoordinatorError::NotFound(game_id.clone()))?;

        let Some(color) = record.color_of(connection_id) else {
            tracing::warn!(%connection_id, %game_id, "Dropping move from non-participant");
            return Ok(());
        };
        let opponent = record.opponent_of(color);

        let history = state.histories.entry(game_id.clone()).or_default();
        let ctx = MoveContext {
            game_id: &game_id,
            mover: *connection_id,
            color,
            history: history.as_slice(),
        };

        if !self.validator.verify_move(&chess_move, &ctx).await {
            tracing::info!(%connection_id, %game_id, %color, "Move rejected by validator");
            return Err(CoordinatorError::MoveRejected(game_id));
        }

        history.push(RelayedMove {
            color,
            chess_move: chess_move.clone(),
        });

        match opponent {
            Some(opponent) => {
                tracing::debug!(%connection_id, %game_id, %color, %opponent, "Relaying move");
                self.send(&opponent, ServerMessage::OpponentMove { chess_move });
            }
            None => {
                tracing::debug!(%connection_id, %game_id, %color, "Move accepted with no opponent seated");
            }
        }
        Ok(())
    }
}
