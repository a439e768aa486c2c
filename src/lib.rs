//! # Checkin
//!
//! Daily check-in: a respondent answers four questions (name, did you eat,
//! mood, water) and submits them once to an append-only record store.
//!
//! ## Modules
//!
//! - [`store`]: Durable, write-only record store with a single `insert`
//! - [`api`]: REST endpoint exposing `insert`, built with Axum
//! - [`client`]: HTTP handle for the remote insert call
//! - [`form`]: Submission controller (form state, presence checks, state machine)
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use checkin::form::{FormValues, SubmissionController, SubmitOutcome};
//! use checkin::store::{open_store, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = open_store(&StoreConfig::new("./checkin_data"))?;
//!
//!     let values = FormValues::new("Samina", "Yes", 8, "3 cups");
//!     let mut form = SubmissionController::with_values(store, values);
//!
//!     match form.submit().await {
//!         SubmitOutcome::Created(token) => println!("Stored entry {}", token),
//!         other => println!("Not stored: {:?}", other),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod form;
pub mod logging;
pub mod store;

// Re-export top-level types for convenience
pub use store::{
    open_store, CreationToken, Entry, RecordStore, StoreBackend, StoreConfig, StoreError,
    StoreResult, StoreStats,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use client::{ClientConfig, ClientError, StoreClient};

pub use form::{
    EntrySink, FormValues, Notice, PageView, SubmissionController, SubmissionState, SubmitError,
    SubmitOutcome, ValidationReport,
};

pub use config::{Config, ConfigError, LoggingConfig};
