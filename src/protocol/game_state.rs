use chrono::{DateTime, Utc};

use super::types::{ConnectionId, GameId, PlayerColor};

// ============================================================================
// SLOT LIFECYCLE
// ============================================================================
//
// Every game has two slots. A slot is in one of three stored states:
//
// ```text
// Empty --(join / reconnect)--> Held(conn)
// Held(conn) --(black holder disconnects)--> Empty
// Held(conn) --(white holder disconnects)--> PendingTakeover(conn)
// PendingTakeover(conn) --(join / reconnect by anyone)--> Held(new_conn)
// ```
//
// `PendingTakeover` only ever appears in the white slot: the creator keeps
// its id on the record so status checks can still report who created the
// game, while any newcomer may claim the seat. The black seat is vacated
// outright because it carries no ownership.
//
// A fourth state, "stale held", is not stored: it is a `Held(conn)` whose
// connection the registry reports as not live. The coordinator resolves it
// at request time.
//
// A game is *available* when black is empty or white is pending takeover,
// and *started* when both slots carry a connection and white is not pending.

/// Stored state of one player slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotState {
    #[default]
    Empty,
    Held(ConnectionId),
    /// White-only: the creator dropped and nobody has claimed the seat yet.
    PendingTakeover(ConnectionId),
}

impl SlotState {
    /// Connection id carried by the slot, including a pending creator.
    #[must_use]
    pub const fn connection(&self) -> Option<ConnectionId> {
        match self {
            Self::Empty => None,
            Self::Held(id) | Self::PendingTakeover(id) => Some(*id),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn is_pending_takeover(&self) -> bool {
        matches!(self, Self::PendingTakeover(_))
    }

    #[must_use]
    pub fn is_held_by(&self, connection_id: &ConnectionId) -> bool {
        self.connection().as_ref() == Some(connection_id)
    }
}

/// One match between a white and a black player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub id: GameId,
    white: SlotState,
    black: SlotState,
    pub created_at: DateTime<Utc>,
}

impl GameRecord {
    /// Create a record with `creator` holding white and black empty.
    #[must_use]
    pub fn new(id: GameId, creator: ConnectionId) -> Self {
        Self {
            id,
            white: SlotState::Held(creator),
            black: SlotState::Empty,
            created_at: Utc::now(),
        }
    }

    /// Rebuild a record from its persisted columns.
    ///
    /// A pending flag without a white connection cannot be represented and is
    /// dropped. A black connection is always restored as `Held`.
    #[must_use]
    pub fn from_parts(
        id: GameId,
        white: Option<ConnectionId>,
        black: Option<ConnectionId>,
        created_at: DateTime<Utc>,
        creator_disconnected: bool,
    ) -> Self {
        let white = match (white, creator_disconnected) {
            (Some(id), true) => SlotState::PendingTakeover(id),
            (Some(id), false) => SlotState::Held(id),
            (None, _) => SlotState::Empty,
        };
        let black = black.map_or(SlotState::Empty, SlotState::Held);
        Self {
            id,
            white,
            black,
            created_at,
        }
    }

    #[must_use]
    pub const fn white(&self) -> SlotState {
        self.white
    }

    #[must_use]
    pub const fn black(&self) -> SlotState {
        self.black
    }

    #[must_use]
    pub const fn slot(&self, color: PlayerColor) -> SlotState {
        match color {
            PlayerColor::White => self.white,
            PlayerColor::Black => self.black,
        }
    }

    #[must_use]
    pub const fn white_connection(&self) -> Option<ConnectionId> {
        self.white.connection()
    }

    #[must_use]
    pub const fn black_connection(&self) -> Option<ConnectionId> {
        self.black.connection()
    }

    #[must_use]
    pub const fn creator_disconnected(&self) -> bool {
        self.white.is_pending_takeover()
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.black.is_empty() || self.creator_disconnected()
    }

    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.white_connection().is_some()
            && self.black_connection().is_some()
            && !self.creator_disconnected()
    }

    /// Color whose slot carries `connection_id`, white checked first.
    #[must_use]
    pub fn color_of(&self, connection_id: &ConnectionId) -> Option<PlayerColor> {
        if self.white.is_held_by(connection_id) {
            Some(PlayerColor::White)
        } else if self.black.is_held_by(connection_id) {
            Some(PlayerColor::Black)
        } else {
            None
        }
    }

    /// Connection occupying the slot opposite to `color`.
    #[must_use]
    pub const fn opponent_of(&self, color: PlayerColor) -> Option<ConnectionId> {
        self.slot(color.opponent()).connection()
    }

    /// Put `connection_id` into the slot, clearing any pending takeover.
    pub fn assign(&mut self, color: PlayerColor, connection_id: ConnectionId) {
        match color {
            PlayerColor::White => self.white = SlotState::Held(connection_id),
            PlayerColor::Black => self.black = SlotState::Held(connection_id),
        }
    }

    /// Apply the disconnect of `connection_id`: white becomes pending takeover,
    /// black is vacated. Returns true when the record changed.
    pub fn release(&mut self, connection_id: &ConnectionId) -> bool {
        let mut changed = false;
        if self.white == SlotState::Held(*connection_id) {
            self.white = SlotState::PendingTakeover(*connection_id);
            changed = true;
        }
        if self.black == SlotState::Held(*connection_id) {
            self.black = SlotState::Empty;
            changed = true;
        }
        changed
    }
}
