//! Checkin Submission Controller
//!
//! Client-side half of the check-in: holds the four answers locally,
//! checks that they are all present, performs the one insert through an
//! injected [`EntrySink`] and tracks where the submission stands.
//!
//! - **fields**: `Field`, `FormValues`
//! - **validation**: presence checks producing a `ValidationReport`
//! - **mood**: slider bounds and emoji lookup
//! - **notice**: transient warnings (toasts)
//! - **sink**: `EntrySink` trait and its implementations
//! - **controller**: the `SubmissionController` state machine
//! - **view**: text rendering of the page
//!
//! # Example
//!
//! ```rust,no_run
//! use checkin::client::{ClientConfig, StoreClient};
//! use checkin::form::{SubmissionController, SubmitOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StoreClient::new(ClientConfig::new("http://localhost:8083"))?;
//!     let mut form = SubmissionController::new(client);
//!
//!     form.set_name("Samina");
//!     form.set_food("Yes");
//!     form.set_mood(8);
//!     form.set_water("3 cups");
//!
//!     if let SubmitOutcome::Created(token) = form.submit().await {
//!         println!("stored as {}", token);
//!     }
//!     Ok(())
//! }
//! ```

pub mod controller;
pub mod fields;
pub mod mood;
pub mod notice;
pub mod sink;
pub mod validation;
pub mod view;

pub use controller::{SubmissionController, SubmissionState, SubmitOutcome};
pub use fields::{Field, FormValues, FOOD_OPTIONS};
pub use mood::{clamp_to_slider, mood_emoji, MOOD_MAX, MOOD_MIN};
pub use notice::{Notice, NoticeVariant};
pub use sink::{EntrySink, SubmitError};
pub use validation::{validate, FieldIssue, IssueReason, ValidationReport};
pub use view::PageView;
