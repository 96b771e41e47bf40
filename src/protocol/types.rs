use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Length of generated game ids (`[0-9a-z]{6}`).
pub const DEFAULT_GAME_ID_LENGTH: usize = 6;
/// Prefix applied to synthetic games created through `addTestGame`.
pub const TEST_GAME_PREFIX: &str = "test-";

/// Unique identifier for a single WebSocket connection.
pub type ConnectionId = Uuid;
/// Opaque identifier for a game record.
pub type GameId = String;

/// One of the two player positions in a game.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    White,
    Black,
}

impl PlayerColor {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry of the joinable-games list pushed to idle clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AvailableGame {
    pub game_id: GameId,
    pub created_at: DateTime<Utc>,
}

/// Snapshot returned for `checkGameStatus`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameStatusPayload {
    pub exists: bool,
    #[serde(default)]
    pub is_white_player: bool,
    #[serde(default)]
    pub is_black_player: bool,
    #[serde(default)]
    pub game_started: bool,
    #[serde(default)]
    pub white_connected: bool,
    #[serde(default)]
    pub black_connected: bool,
}

impl GameStatusPayload {
    /// Status reported for an unknown game id.
    #[must_use]
    pub fn missing() -> Self {
        Self::default()
    }
}
