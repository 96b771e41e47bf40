use serde::{Deserialize, Serialize};
use std::fmt;

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors
    InvalidInput,
    MessageTooLarge,

    // Game errors
    GameNotFound,
    GameFull,
    MoveRejected,

    // Re-entry errors
    ReentryTokenInvalid,
    ReentryTokenRequired,
    SlotOccupied,

    // Admin errors
    AdminDisabled,

    // Server errors
    InternalError,
}

impl ErrorCode {
    /// Returns a human-readable description of this error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => {
                "The message could not be parsed. Check the event type and payload fields."
            }
            Self::MessageTooLarge => {
                "The message size exceeds the maximum allowed limit. Please send a smaller message."
            }
            Self::GameNotFound => {
                "The requested game could not be found. It may have been cleared or the id is incorrect."
            }
            Self::GameFull => "Both seats of this game are taken. Pick another game.",
            Self::MoveRejected => "The move was rejected by the move validator and was not relayed.",
            Self::ReentryTokenInvalid => {
                "The re-entry token does not belong to this game or has been superseded."
            }
            Self::ReentryTokenRequired => {
                "This server requires the re-entry token issued with your seat to reconnect."
            }
            Self::SlotOccupied => {
                "Your seat is currently held by another live connection."
            }
            Self::AdminDisabled => "Administrative events are disabled on this server.",
            Self::InternalError => {
                "An internal server error occurred. Please try again or contact support if the issue persists."
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
