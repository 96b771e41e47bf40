// Protocol module: message types, identifiers and the per-game slot model

pub mod error_codes;
pub mod game_ids;
pub mod game_state;
pub mod messages;
pub mod types;

pub use error_codes::ErrorCode;

pub use types::{
    AvailableGame, ConnectionId, GameId, GameStatusPayload, PlayerColor, DEFAULT_GAME_ID_LENGTH,
    TEST_GAME_PREFIX,
};

pub use messages::{ClientMessage, ServerMessage};

pub use game_state::{GameRecord, SlotState};
