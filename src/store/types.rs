//! Core data types for the record store
//!
//! - `Entry`: the four values a respondent submits
//! - `CreationToken`: opaque handle returned by a successful insert
//! - `StoredEntry`: an entry as persisted, with its hidden bookkeeping

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One submitted check-in.
///
/// Values are stored as given. `food` is expected to be "Yes" or "No" and
/// `mood` to fall in 1..=10, but neither is enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    /// Respondent name, free text
    pub name: String,
    /// Whether the respondent ate
    pub food: String,
    /// Mood rating
    pub mood: i64,
    /// Free-form description of fluid intake
    pub water: String,
}

impl Entry {
    pub fn new(
        name: impl Into<String>,
        food: impl Into<String>,
        mood: i64,
        water: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            food: food.into(),
            mood,
            water: water.into(),
        }
    }
}

/// Opaque token handed back for a created entry.
///
/// Callers only check whether it is truthy (non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreationToken(String);

impl CreationToken {
    /// Mint a fresh random token
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty token counts as "no entry was created"
    pub fn is_truthy(&self) -> bool {
        !self.0.is_empty()
    }
}

impl From<String> for CreationToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for CreationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An entry as it sits in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry {
    /// Opaque identifier, doubles as the creation token
    pub id: CreationToken,
    /// Insertion order, starting at 0
    pub seq: u64,
    /// Unix timestamp in milliseconds
    pub created_at: i64,
    /// The submitted values
    pub entry: Entry,
}

impl StoredEntry {
    /// Wrap an entry with a fresh id and the current time
    pub fn new(seq: u64, entry: Entry) -> Self {
        Self {
            id: CreationToken::generate(),
            seq,
            created_at: Utc::now().timestamp_millis(),
            entry,
        }
    }
}
