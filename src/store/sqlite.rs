//! SQLite entry table
//!
//! Alternative backend keeping entries in a single `entries` table.
//! `seq` is the rowid so insertion order comes for free; rows are only
//! ever inserted.

use crate::store::error::StoreResult;
use crate::store::types::{Entry, StoredEntry};
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;

/// Append-only table of entries
pub struct EntryTable {
    conn: Connection,
}

impl EntryTable {
    /// Create or open the table at `path`
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = FULL;
            ",
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS entries (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                name TEXT NOT NULL,
                food TEXT NOT NULL,
                mood INTEGER NOT NULL,
                water TEXT NOT NULL
            )",
            [],
        )?;

        tracing::debug!(path = %path.display(), "Opened entry table");

        Ok(Self { conn })
    }

    /// Insert one row and return it as stored
    pub fn insert(&mut self, entry: Entry) -> StoreResult<StoredEntry> {
        let mut stored = StoredEntry::new(0, entry);

        self.conn.execute(
            "INSERT INTO entries (id, created_at, name, food, mood, water)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                stored.id.as_str(),
                stored.created_at,
                stored.entry.name,
                stored.entry.food,
                stored.entry.mood,
                stored.entry.water,
            ],
        )?;

        // AUTOINCREMENT starts at 1
        stored.seq = (self.conn.last_insert_rowid() - 1) as u64;
        Ok(stored)
    }

    /// Number of rows in the table
    pub fn count(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    #[cfg(test)]
    fn rows(&self) -> Vec<StoredEntry> {
        let mut stmt = self
            .conn
            .prepare("SELECT seq, id, created_at, name, food, mood, water FROM entries ORDER BY seq")
            .unwrap();

        stmt.query_map([], |row| {
            let seq: i64 = row.get(0)?;
            let id: String = row.get(1)?;
            Ok(StoredEntry {
                id: id.into(),
                seq: (seq - 1) as u64,
                created_at: row.get(2)?,
                entry: Entry {
                    name: row.get(3)?,
                    food: row.get(4)?,
                    mood: row.get(5)?,
                    water: row.get(6)?,
                },
            })
        })
        .unwrap()
        .map(|r| r.unwrap())
        .collect()
    }
}
