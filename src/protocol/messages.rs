use serde::{Deserialize, Serialize};

use super::error_codes::ErrorCode;
use super::types::{AvailableGame, ConnectionId, GameId, GameStatusPayload, PlayerColor};

/// Message types sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Open a new game with the sender as white
    CreateGame,
    /// Join an existing game by id
    #[serde(rename_all = "camelCase")]
    JoinGame { game_id: GameId },
    /// Relay a move to the opponent; the payload is opaque to the server
    #[serde(rename_all = "camelCase")]
    Move {
        game_id: GameId,
        #[serde(rename = "move")]
        chess_move: serde_json::Value,
    },
    /// Request the current list of joinable games
    GetAvailableGames,
    /// Ask for a game's slot/liveness snapshot
    #[serde(rename_all = "camelCase")]
    CheckGameStatus { game_id: GameId },
    /// Re-enter a game after a dropped connection
    #[serde(rename_all = "camelCase")]
    ReconnectToGame {
        game_id: GameId,
        /// Token handed out with the last `playerAssigned` for this game
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reentry_token: Option<String>,
    },
    /// Insert a synthetic game (admin/debug)
    AddTestGame,
    /// Wipe the game directory (admin/debug)
    ClearAllGames,
    /// Heartbeat to keep the connection marked live
    Ping,
}

impl ClientMessage {
    /// Wire name of the event, used for log fields.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::CreateGame => "createGame",
            Self::JoinGame { .. } => "joinGame",
            Self::Move { .. } => "move",
            Self::GetAvailableGames => "getAvailableGames",
            Self::CheckGameStatus { .. } => "checkGameStatus",
            Self::ReconnectToGame { .. } => "reconnectToGame",
            Self::AddTestGame => "addTestGame",
            Self::ClearAllGames => "clearAllGames",
            Self::Ping => "ping",
        }
    }
}

/// Message types sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    /// A game was created on behalf of the sender
    #[serde(rename_all = "camelCase")]
    GameCreated { game_id: GameId },
    /// The sender now holds a slot
    #[serde(rename_all = "camelCase")]
    PlayerAssigned {
        color: PlayerColor,
        reentry_token: String,
    },
    /// Current joinable games, insertion ordered
    AvailableGames(Vec<AvailableGame>),
    /// Both slots are filled
    #[serde(rename_all = "camelCase")]
    GameStart { opponent_id: ConnectionId },
    /// Move relayed verbatim from the opponent
    OpponentMove {
        #[serde(rename = "move")]
        chess_move: serde_json::Value,
    },
    OpponentDisconnected,
    OpponentReconnected,
    GameStatus(GameStatusPayload),
    /// Recoverable failure for the originating request
    #[serde(rename_all = "camelCase")]
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        error_code: Option<ErrorCode>,
    },
    #[serde(rename_all = "camelCase")]
    TestGameAdded { game_id: GameId },
    GamesCleared { success: bool, count: usize },
    /// Heartbeat response
    Pong,
}
