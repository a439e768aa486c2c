//! Where submitted entries go
//!
//! The controller only knows this trait; the concrete sink (remote
//! client or an in-process store) is chosen by whoever builds it.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::client::{ClientError, StoreClient};
use crate::store::{CreationToken, Entry, RecordStore, StoreError};

/// Errors surfaced by a failed insert
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Remote call failed: {0}")]
    Remote(#[from] ClientError),

    #[error("Store write failed: {0}")]
    Store(#[from] StoreError),

    #[error("No entry was created")]
    EmptyToken,
}

/// Destination for the single insert a submission performs
#[async_trait]
pub trait EntrySink: Send + Sync {
    async fn insert(&self, entry: &Entry) -> Result<CreationToken, SubmitError>;
}

#[async_trait]
impl EntrySink for StoreClient {
    async fn insert(&self, entry: &Entry) -> Result<CreationToken, SubmitError> {
        Ok(StoreClient::insert(self, entry).await?)
    }
}

#[async_trait]
impl EntrySink for Arc<dyn RecordStore> {
    async fn insert(&self, entry: &Entry) -> Result<CreationToken, SubmitError> {
        Ok(RecordStore::insert(self.as_ref(), entry.clone()).await?)
    }
}
