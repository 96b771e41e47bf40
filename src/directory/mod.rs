//! Game directory: every known game record, in insertion order, backed by a
//! whole-snapshot [`GameStore`].

mod store;

pub use store::{
    create_store, GameStore, InMemoryStore, JsonFileStore, StoreError, StoredDirectory,
    StoredGame,
};

use std::collections::HashMap;
use std::sync::Arc;

use crate::protocol::{game_ids, AvailableGame, ConnectionId, GameId, GameRecord};

/// Attempts at a 6-character id before falling back to a longer one.
const MAX_ID_ATTEMPTS: u8 = 16;

pub struct GameDirectory {
    games: HashMap<GameId, GameRecord>,
    order: Vec<GameId>,
    store: Arc<dyn GameStore>,
}

impl GameDirectory {
    /// Empty directory that will persist through `store`.
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        Self {
            games: HashMap::new(),
            order: Vec::new(),
            store,
        }
    }

    /// Load the persisted snapshot. Unreadable or corrupt content fails closed
    /// to an empty directory.
    pub async fn load(store: Arc<dyn GameStore>) -> Self {
        let mut directory = Self::new(store);
        match directory.store.load().await {
            Ok(records) => {
                for record in records {
                    directory.insert_unpersisted(record);
                }
                tracing::info!(
                    games = directory.len(),
                    store = %directory.store.describe(),
                    "Loaded game directory"
                );
            }
            Err(err) => {
                tracing::error!(
                    store = %directory.store.describe(),
                    error = %err,
                    "Failed to load game directory; starting empty"
                );
            }
        }
        directory
    }

    /// Create a game with `creator` holding white and persist it.
    pub async fn create(&mut self, creator: ConnectionId) -> GameRecord {
        let id = self.unique_id(game_ids::generate_game_id);
        let record = GameRecord::new(id, creator);
        self.insert_unpersisted(record.clone());
        self.persist().await;
        record
    }

    /// Insert a synthetic record under a fresh `test-` id and persist it.
    pub async fn create_test_game(&mut self, placeholder_white: ConnectionId) -> GameRecord {
        let id = self.unique_id(game_ids::generate_test_game_id);
        let record = GameRecord::new(id, placeholder_white);
        self.insert_unpersisted(record.clone());
        self.persist().await;
        record
    }

    pub fn get(&self, id: &str) -> Option<&GameRecord> {
        self.games.get(id)
    }

    /// Store `record` (replacing any record with the same id) and persist the
    /// full set.
    pub async fn put(&mut self, record: GameRecord) {
        self.insert_unpersisted(record);
        self.persist().await;
    }

    /// Apply `release` to every record the connection occupies. Persists once
    /// if anything changed and returns the pre-change copies of the affected
    /// records.
    pub async fn release_connection(&mut self, connection_id: &ConnectionId) -> Vec<GameRecord> {
        let mut affected = Vec::new();
        for id in &self.order {
            if let Some(record) = self.games.get_mut(id) {
                let before = record.clone();
                if record.release(connection_id) {
                    affected.push(before);
                }
            }
        }
        if !affected.is_empty() {
            self.persist().await;
        }
        affected
    }

    /// Joinable games (`black` empty or creator pending takeover), oldest first.
    pub fn list_available(&self) -> Vec<AvailableGame> {
        self.records()
            .filter(|record| record.is_available())
            .map(|record| AvailableGame {
                game_id: record.id.clone(),
                created_at: record.created_at,
            })
            .collect()
    }

    /// Remove every record and persist the empty directory. Returns the
    /// number of records removed.
    pub async fn clear(&mut self) -> usize {
        let count = self.games.len();
        self.games.clear();
        self.order.clear();
        self.persist().await;
        count
    }

    /// Records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &GameRecord> {
        self.order.iter().filter_map(|id| self.games.get(id))
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Write the whole directory. Failures are logged and the in-memory state
    /// stays authoritative until the next successful write.
    pub async fn persist(&self) -> bool {
        let snapshot: Vec<GameRecord> = self.records().cloned().collect();
        match self.store.save(&snapshot).await {
            Ok(()) => {
                tracing::debug!(games = snapshot.len(), "Persisted game directory");
                true
            }
            Err(err) => {
                tracing::warn!(
                    games = snapshot.len(),
                    store = %self.store.describe(),
                    error = %err,
                    "Failed to persist game directory; keeping state in memory"
                );
                false
            }
        }
    }

    fn insert_unpersisted(&mut self, record: GameRecord) {
        if !self.games.contains_key(&record.id) {
            self.order.push(record.id.clone());
        }
        self.games.insert(record.id.clone(), record);
    }

    fn unique_id(&self, generate: fn() -> String) -> GameId {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = generate();
            if !self.games.contains_key(&id) {
                return id;
            }
        }
        // Short id space exhausted by collisions; widen it.
        loop {
            let id = format!("{}{}", generate(), game_ids::generate_game_id());
            if !self.games.contains_key(&id) {
                return id;
            }
        }
    }
}
