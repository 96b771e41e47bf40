//! Connection liveness registry.
//!
//! Tracks every connection id the coordinator has seen. Entries are created
//! lazily on first contact and never removed, so a dropped connection stays
//! queryable for the lifetime of the process. Game records only hold weak
//! references (connection ids) into this map; liveness truth lives here.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::protocol::ConnectionId;

/// Liveness state of one connection id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivenessEntry {
    pub connected: bool,
    pub first_seen_at: DateTime<Utc>,
    pub last_active_at: Option<DateTime<Utc>>,
    pub disconnected_at: Option<DateTime<Utc>>,
}

impl LivenessEntry {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            connected: true,
            first_seen_at: now,
            last_active_at: None,
            disconnected_at: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    entries: HashMap<ConnectionId, LivenessEntry>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or re-activate the entry for a freshly established connection.
    pub fn on_connect(&mut self, connection_id: ConnectionId) {
        let now = Utc::now();
        self.entries
            .entry(connection_id)
            .and_modify(|entry| {
                entry.connected = true;
                entry.disconnected_at = None;
            })
            .or_insert_with(|| LivenessEntry::new(now));
    }

    /// Mark a connection as gone. Unknown ids are recorded as already dropped.
    pub fn on_disconnect(&mut self, connection_id: ConnectionId) {
        let now = Utc::now();
        let entry = self
            .entries
            .entry(connection_id)
            .or_insert_with(|| LivenessEntry::new(now));
        entry.connected = false;
        entry.disconnected_at = Some(now);
    }

    /// Record activity, forcing the connection back to live.
    pub fn touch(&mut self, connection_id: ConnectionId) {
        let now = Utc::now();
        let entry = self
            .entries
            .entry(connection_id)
            .or_insert_with(|| LivenessEntry::new(now));
        entry.connected = true;
        entry.last_active_at = Some(now);
    }

    /// Unknown ids are never live.
    pub fn is_live(&self, connection_id: &ConnectionId) -> bool {
        self.entries
            .get(connection_id)
            .is_some_and(|entry| entry.connected)
    }

    /// Liveness of an optional slot holder; an empty slot is not live.
    pub fn is_live_opt(&self, connection_id: Option<ConnectionId>) -> bool {
        connection_id.is_some_and(|id| self.is_live(&id))
    }

    pub fn entry(&self, connection_id: &ConnectionId) -> Option<&LivenessEntry> {
        self.entries.get(connection_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.entries.values().filter(|entry| entry.connected).count()
    }
}
