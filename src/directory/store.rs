use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::config::{StorageBackend, StorageConfig};
use crate::protocol::{ConnectionId, GameId, GameRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access game store at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("game store content is not a valid directory: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Whole-directory persistence. Every save overwrites the previous snapshot.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Load every stored record in insertion order.
    async fn load(&self) -> Result<Vec<GameRecord>, StoreError>;

    /// Replace the stored snapshot with `games`.
    async fn save(&self, games: &[GameRecord]) -> Result<(), StoreError>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}

/// Create the store selected by configuration.
pub fn create_store(config: &StorageConfig) -> Arc<dyn GameStore> {
    match config.backend {
        StorageBackend::Memory => Arc::new(InMemoryStore::new()),
        StorageBackend::JsonFile => Arc::new(JsonFileStore::new(&config.path)),
    }
}

/// Persisted columns of one game, keyed by id in the enclosing map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredGame {
    #[serde(default)]
    pub white: Option<ConnectionId>,
    #[serde(default)]
    pub black: Option<ConnectionId>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub creator_disconnected: bool,
}

impl StoredGame {
    fn from_record(record: &GameRecord) -> Self {
        Self {
            white: record.white_connection(),
            black: record.black_connection(),
            created_at: record.created_at,
            creator_disconnected: record.creator_disconnected(),
        }
    }

    fn into_record(self, id: GameId) -> GameRecord {
        GameRecord::from_parts(
            id,
            self.white,
            self.black,
            self.created_at,
            self.creator_disconnected,
        )
    }
}

/// JSON object `{ "<game id>": StoredGame, ... }` that keeps document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredDirectory(pub Vec<(GameId, StoredGame)>);

impl StoredDirectory {
    pub fn from_records(records: &[GameRecord]) -> Self {
        Self(
            records
                .iter()
                .map(|record| (record.id.clone(), StoredGame::from_record(record)))
                .collect(),
        )
    }

    pub fn into_records(self) -> Vec<GameRecord> {
        self.0
            .into_iter()
            .map(|(id, stored)| stored.into_record(id))
            .collect()
    }
}

impl Serialize for StoredDirectory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, game) in &self.0 {
            map.serialize_entry(id, game)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StoredDirectory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedVisitor(PhantomData<StoredDirectory>);

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = StoredDirectory;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of game id to game record")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut games = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, game)) = access.next_entry::<GameId, StoredGame>()? {
                    // Later duplicates win, matching object semantics.
                    games.retain(|(existing, _): &(GameId, StoredGame)| existing != &id);
                    games.push((id, game));
                }
                Ok(StoredDirectory(games))
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}

/// Snapshot kept in process memory; nothing survives a restart.
#[derive(Default)]
pub struct InMemoryStore {
    snapshot: RwLock<Vec<GameRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with records, as if loaded from disk.
    pub fn with_records(records: Vec<GameRecord>) -> Self {
        Self {
            snapshot: RwLock::new(records),
        }
    }

    /// Most recently saved snapshot.
    pub async fn snapshot(&self) -> Vec<GameRecord> {
        self.snapshot.read().await.clone()
    }
}

#[async_trait]
impl GameStore for InMemoryStore {
    async fn load(&self) -> Result<Vec<GameRecord>, StoreError> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(&self, games: &[GameRecord]) -> Result<(), StoreError> {
        *self.snapshot.write().await = games.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Pretty-printed JSON document on local disk.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl GameStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<GameRecord>, StoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(self.io_error(err)),
        };

        let directory: StoredDirectory = serde_json::from_str(&contents)?;
        Ok(directory.into_records())
    }

    async fn save(&self, games: &[GameRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| self.io_error(err))?;
        }

        let json = serde_json::to_string_pretty(&StoredDirectory::from_records(games))?;

        // Write to a sibling temp file, then rename over the target.
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json.as_bytes())
            .await
            .map_err(|err| self.io_error(err))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|err| self.io_error(err))?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}
