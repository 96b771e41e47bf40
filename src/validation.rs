//! Move validation capability.
//!
//! The coordinator does not know chess rules. It hands every relayed move to a
//! [`MoveValidator`] together with the moves already relayed in that game and
//! only forwards the move when the validator accepts it.

use async_trait::async_trait;
use serde_json::Value;

use crate::protocol::{ConnectionId, GameId, PlayerColor};

/// A move that was accepted and relayed earlier in the game.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayedMove {
    pub color: PlayerColor,
    pub chess_move: Value,
}

/// What the validator sees besides the move itself.
#[derive(Debug, Clone, Copy)]
pub struct MoveContext<'a> {
    pub game_id: &'a GameId,
    pub mover: ConnectionId,
    pub color: PlayerColor,
    /// Accepted moves in relay order; stands in for the board position.
    pub history: &'a [RelayedMove],
}

#[async_trait]
pub trait MoveValidator: Send + Sync {
    /// Return `true` to relay the move. Called exactly once per move.
    async fn verify_move(&self, chess_move: &Value, ctx: &MoveContext<'_>) -> bool;
}

/// Relays every move unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAllValidator;

#[async_trait]
impl MoveValidator for AcceptAllValidator {
    async fn verify_move(&self, _chess_move: &Value, _ctx: &MoveContext<'_>) -> bool {
        true
    }
}
