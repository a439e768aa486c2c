//! Entry Routes
//!
//! - POST /api/v1/entries - Insert one entry

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{CreateEntryRequest, CreateEntryResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// POST /api/v1/entries
///
/// Persist one entry. No schema checks beyond what deserialization does;
/// duplicates are stored as separate records.
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateEntryRequest>,
) -> ApiResult<(StatusCode, Json<CreateEntryResponse>)> {
    let id = state.store.insert(req.into()).await?;

    tracing::info!(entry_id = %id, "Entry created");

    Ok((StatusCode::CREATED, Json(CreateEntryResponse { id })))
}
