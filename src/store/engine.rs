//! Record store front
//!
//! Both backends sit behind [`RecordStore`], which exposes the one write
//! operation plus what the health endpoint needs. Appends are serialized
//! behind a lock and run on the blocking pool; concurrent callers queue up
//! and each get their own record.

use crate::store::error::{StoreError, StoreResult};
use crate::store::log::{EntryLog, SyncMode};
use crate::store::sqlite::EntryTable;
use crate::store::types::{CreationToken, Entry};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Which storage backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Append-only record log
    #[default]
    Log,
    /// SQLite table
    Sqlite,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Log => "log",
            StoreBackend::Sqlite => "sqlite",
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log" => Ok(StoreBackend::Log),
            "sqlite" => Ok(StoreBackend::Sqlite),
            other => Err(StoreError::Config(format!("Unknown store backend: {}", other))),
        }
    }
}

/// Configuration for the record store
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Root directory for store files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub backend: StoreBackend,
    /// Fsync policy for the log backend
    #[serde(default)]
    pub sync_mode: SyncMode,
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("checkin"))
        .unwrap_or_else(|| PathBuf::from("./checkin_data"))
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            backend: StoreBackend::default(),
            sync_mode: SyncMode::default(),
        }
    }
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Builder method: pick a backend
    pub fn backend(mut self, backend: StoreBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Path to the log backend file
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("entries.log")
    }

    /// Path to the SQLite backend file
    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join("entries.db")
    }
}

/// Store statistics
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub backend: &'static str,
    pub entries: u64,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "backend={}, entries={}", self.backend, self.entries)
    }
}

/// Durable, write-only collection of entries
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist one entry and return its creation token
    async fn insert(&self, entry: Entry) -> StoreResult<CreationToken>;

    /// Backend name and record count
    async fn stats(&self) -> StoreResult<StoreStats>;

    /// Make sure everything written is on disk
    async fn flush(&self) -> StoreResult<()>;
}

/// Open the backend named in `config`
pub fn open_store(config: &StoreConfig) -> StoreResult<Arc<dyn RecordStore>> {
    std::fs::create_dir_all(&config.data_dir)?;

    let store: Arc<dyn RecordStore> = match config.backend {
        StoreBackend::Log => Arc::new(LogStore::open(config)?),
        StoreBackend::Sqlite => Arc::new(SqliteStore::open(config)?),
    };

    tracing::info!(
        backend = config.backend.as_str(),
        data_dir = %config.data_dir.display(),
        "Record store opened"
    );

    Ok(store)
}

/// Record store backed by the append-only log
pub struct LogStore {
    log: Arc<Mutex<EntryLog>>,
}

impl LogStore {
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let log = EntryLog::open(config.log_path(), config.sync_mode)?;
        Ok(Self {
            log: Arc::new(Mutex::new(log)),
        })
    }
}

#[async_trait]
impl RecordStore for LogStore {
    async fn insert(&self, entry: Entry) -> StoreResult<CreationToken> {
        // Appends fsync; keep them off the runtime threads
        let log = Arc::clone(&self.log);
        let stored =
            tokio::task::spawn_blocking(move || log.blocking_lock().append(entry)).await??;

        tracing::debug!(seq = stored.seq, id = %stored.id, "Entry appended");
        Ok(stored.id)
    }

    async fn stats(&self) -> StoreResult<StoreStats> {
        let log = self.log.lock().await;
        Ok(StoreStats {
            backend: StoreBackend::Log.as_str(),
            entries: log.entry_count(),
        })
    }

    async fn flush(&self) -> StoreResult<()> {
        let log = Arc::clone(&self.log);
        tokio::task::spawn_blocking(move || log.blocking_lock().sync()).await?
    }
}

/// Record store backed by SQLite
pub struct SqliteStore {
    table: Arc<Mutex<EntryTable>>,
}

impl SqliteStore {
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let table = EntryTable::open(config.sqlite_path())?;
        Ok(Self {
            table: Arc::new(Mutex::new(table)),
        })
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn insert(&self, entry: Entry) -> StoreResult<CreationToken> {
        let table = Arc::clone(&self.table);
        let stored =
            tokio::task::spawn_blocking(move || table.blocking_lock().insert(entry)).await??;

        tracing::debug!(seq = stored.seq, id = %stored.id, "Entry inserted");
        Ok(stored.id)
    }

    async fn stats(&self) -> StoreResult<StoreStats> {
        let table = Arc::clone(&self.table);
        let entries = tokio::task::spawn_blocking(move || table.blocking_lock().count()).await??;

        Ok(StoreStats {
            backend: StoreBackend::Sqlite.as_str(),
            entries,
        })
    }

    async fn flush(&self) -> StoreResult<()> {
        // Every statement commits on its own
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::log::LogIterator;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_log_store_insert_returns_truthy_token() {
        let dir = tempdir().unwrap();
        let store = open_store(&StoreConfig::new(dir.path())).unwrap();

        let token = store
            .insert(Entry::new("Samina", "Yes", 8, "3 cups"))
            .await
            .unwrap();

        assert!(token.is_truthy());
        assert_eq!(store.stats().await.unwrap().entries, 1);
    }

    #[tokio::test]
    async fn test_sqlite_store_insert() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::new(dir.path()).backend(StoreBackend::Sqlite);
        let store = open_store(&config).unwrap();

        store.insert(Entry::new("Samina", "Yes", 8, "3 cups")).await.unwrap();
        store.insert(Entry::new("Samina", "Yes", 8, "3 cups")).await.unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.backend, "sqlite");
        assert_eq!(stats.entries, 2);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_all_land() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::new(dir.path());
        let store = open_store(&config).unwrap();

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .insert(Entry::new(format!("tab-{}", i), "Yes", 5, "1 cup"))
                    .await
                    .unwrap()
            }));
        }

        let mut tokens = Vec::new();
        for handle in handles {
            tokens.push(handle.await.unwrap());
        }
        store.flush().await.unwrap();

        tokens.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        tokens.dedup();
        assert_eq!(tokens.len(), 20);

        let mut seqs: Vec<u64> = LogIterator::new(config.log_path())
            .unwrap()
            .map(|r| r.unwrap().seq)
            .collect();
        seqs.sort_unstable();
        assert_eq!(seqs, (0..20).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn test_inserts_after_torn_tail_survive_restart() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::new(dir.path());

        {
            let store = open_store(&config).unwrap();
            store.insert(Entry::new("a", "Yes", 1, "1 cup")).await.unwrap();
            store.insert(Entry::new("b", "Yes", 2, "2 cups")).await.unwrap();
        }

        // Crash halfway through the second record
        let len = std::fs::metadata(config.log_path()).unwrap().len();
        std::fs::OpenOptions::new()
            .write(true)
            .open(config.log_path())
            .unwrap()
            .set_len(len - 3)
            .unwrap();

        {
            let store = open_store(&config).unwrap();
            store.insert(Entry::new("c", "No", 3, "3 cups")).await.unwrap();
            store.insert(Entry::new("d", "No", 4, "4 cups")).await.unwrap();
            assert_eq!(store.stats().await.unwrap().entries, 3);
        }

        let store = open_store(&config).unwrap();
        assert_eq!(store.stats().await.unwrap().entries, 3);

        let names: Vec<String> = LogIterator::new(config.log_path())
            .unwrap()
            .map(|r| r.unwrap().entry.name)
            .collect();
        assert_eq!(names, vec!["a", "c", "d"]);
    }

    #[tokio::test]
    async fn test_sqlite_store_count_survives_reopen() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::new(dir.path()).backend(StoreBackend::Sqlite);

        {
            let store = open_store(&config).unwrap();
            store.insert(Entry::new("Samina", "Yes", 8, "3 cups")).await.unwrap();
            store.flush().await.unwrap();
        }

        let store = open_store(&config).unwrap();
        assert_eq!(store.stats().await.unwrap().entries, 1);
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("log".parse::<StoreBackend>().unwrap(), StoreBackend::Log);
        assert_eq!("SQLite".parse::<StoreBackend>().unwrap(), StoreBackend::Sqlite);
        assert!("postgres".parse::<StoreBackend>().is_err());
    }
}
