//! Checkin Record Store
//!
//! A durable, append-only collection of submitted entries. The only
//! operation callers get is `insert`; records are never updated or
//! removed.
//!
//! - **types**: `Entry`, `CreationToken`, `StoredEntry`
//! - **log**: length-prefixed, CRC-checked append-only record file
//! - **sqlite**: single-table SQLite alternative
//! - **engine**: `RecordStore` trait, configuration and backend selection
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use checkin::store::{open_store, Entry, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = open_store(&StoreConfig::new("./data"))?;
//!
//!     let token = store.insert(Entry::new("Samina", "Yes", 8, "3 cups")).await?;
//!     assert!(token.is_truthy());
//!
//!     store.flush().await?;
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;
pub mod log;
pub mod sqlite;
pub mod types;

pub use engine::{open_store, LogStore, RecordStore, SqliteStore, StoreBackend, StoreConfig, StoreStats};
pub use error::{StoreError, StoreResult};
pub use log::{EntryLog, LogIterator, SyncMode};
pub use sqlite::EntryTable;
pub use types::{CreationToken, Entry, StoredEntry};
