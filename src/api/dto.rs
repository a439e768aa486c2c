//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.

use serde::{Deserialize, Serialize};

use crate::store::{CreationToken, Entry};

/// Body of `POST /api/v1/entries`.
///
/// Only the field types are checked; empty strings and any mood value
/// are accepted as-is.
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateEntryRequest {
    pub name: String,
    pub food: String,
    pub mood: i64,
    pub water: String,
}

impl From<CreateEntryRequest> for Entry {
    fn from(req: CreateEntryRequest) -> Self {
        Entry {
            name: req.name,
            food: req.food,
            mood: req.mood,
            water: req.water,
        }
    }
}

impl From<&Entry> for CreateEntryRequest {
    fn from(entry: &Entry) -> Self {
        Self {
            name: entry.name.clone(),
            food: entry.food.clone(),
            mood: entry.mood,
            water: entry.water.clone(),
        }
    }
}

/// Response to a successful insert
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateEntryResponse {
    /// Opaque creation token
    pub id: CreationToken,
}

/// Full health status
#[derive(Debug, Deserialize, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// "ok" or "error"
    pub store: String,
    /// Backend name, when the store answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    /// Stored record count, when the store answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<u64>,
    pub uptime_seconds: u64,
    pub version: String,
}
