//! Re-entry token support
//!
//! Every seat assignment hands the client an opaque token bound to one
//! (game, color) pair. Presenting it on `reconnectToGame` lets the returning
//! player reclaim that exact seat instead of racing other claimants. Only the
//! most recent token per seat is honoured. Tokens are held in memory and do
//! not survive a restart.

use crate::protocol::{GameId, PlayerColor};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// A token issued alongside `playerAssigned`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReentryToken {
    /// Token value (UUID)
    pub token: String,
    pub game_id: GameId,
    pub color: PlayerColor,
    pub issued_at: DateTime<Utc>,
}

impl ReentryToken {
    fn new(game_id: GameId, color: PlayerColor) -> Self {
        Self {
            token: Uuid::new_v4().to_string(),
            game_id,
            color,
            issued_at: Utc::now(),
        }
    }

    /// Check if the token was issued for `game_id`
    pub fn is_valid_for(&self, game_id: &str) -> bool {
        self.game_id == game_id
    }
}

/// Outstanding tokens, at most one per seat.
#[derive(Debug, Default)]
pub struct ReentryTokens {
    by_token: HashMap<String, ReentryToken>,
    by_seat: HashMap<(GameId, PlayerColor), String>,
}

impl ReentryTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for the seat, revoking the previous one.
    pub fn issue(&mut self, game_id: &str, color: PlayerColor) -> String {
        let token = ReentryToken::new(game_id.to_string(), color);
        let value = token.token.clone();

        if let Some(previous) = self
            .by_seat
            .insert((game_id.to_string(), color), value.clone())
        {
            self.by_token.remove(&previous);
        }
        self.by_token.insert(value.clone(), token);

        tracing::debug!(%game_id, %color, "Issued re-entry token");
        value
    }

    /// Seat the token grants in `game_id`, if it is current.
    pub fn validate(&self, token: &str, game_id: &str) -> Option<PlayerColor> {
        self.by_token
            .get(token)
            .filter(|issued| issued.is_valid_for(game_id))
            .map(|issued| issued.color)
    }

    /// Whether a current token exists for the seat, i.e. some player was
    /// assigned it during this process's lifetime.
    pub fn is_owned(&self, game_id: &str, color: PlayerColor) -> bool {
        self.by_seat.contains_key(&(game_id.to_string(), color))
    }

    pub fn clear(&mut self) {
        self.by_token.clear();
        self.by_seat.clear();
    }

    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_validates_for_its_game_only() {
        let mut tokens = ReentryTokens::new();
        let token = tokens.issue("abc123", PlayerColor::Black);

        assert_eq!(tokens.validate(&token, "abc123"), Some(PlayerColor::Black));
        assert_eq!(tokens.validate(&token, "zzz999"), None);
        assert_eq!(tokens.validate("not-a-token", "abc123"), None);
    }

    #[test]
    fn reissuing_a_seat_revokes_previous_token() {
        let mut tokens = ReentryTokens::new();
        let first = tokens.issue("abc123", PlayerColor::White);
        let second = tokens.issue("abc123", PlayerColor::White);

        assert_ne!(first, second);
        assert_eq!(tokens.validate(&first, "abc123"), None);
        assert_eq!(tokens.validate(&second, "abc123"), Some(PlayerColor::White));
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn seats_are_independent() {
        let mut tokens = ReentryTokens::new();
        let white = tokens.issue("abc123", PlayerColor::White);
        let black = tokens.issue("abc123", PlayerColor::Black);

        assert_eq!(tokens.validate(&white, "abc123"), Some(PlayerColor::White));
        assert_eq!(tokens.validate(&black, "abc123"), Some(PlayerColor::Black));
    }

    #[test]
    fn ownership_follows_issued_seats_until_clear() {
        let mut tokens = ReentryTokens::new();
        tokens.issue("abc123", PlayerColor::White);

        assert!(tokens.is_owned("abc123", PlayerColor::White));
        assert!(!tokens.is_owned("abc123", PlayerColor::Black));
        assert!(!tokens.is_owned("zzz999", PlayerColor::White));

        tokens.clear();
        assert!(tokens.is_empty());
        assert!(!tokens.is_owned("abc123", PlayerColor::White));
    }
}
