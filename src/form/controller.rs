//! Submission controller
//!
//! Holds the form values and walks the submission state machine:
//!
//! ```text
//!   Idle --submit, fields missing--> Idle (+ warning notice)
//!   Idle --submit, fields present--> Submitting --token--> Success
//!                                    Submitting --error--> Idle (+ retry notice)
//!                                    Submitting --dropped--> Idle
//! ```
//!
//! `Success` is terminal: a controller submits at most one entry.
//! State changes are broadcast on a watch channel so a front-end can
//! disable the submit control while a call is in flight.

use tokio::sync::watch;

use crate::form::fields::FormValues;
use crate::form::mood::{clamp_to_slider, mood_emoji};
use crate::form::notice::Notice;
use crate::form::sink::{EntrySink, SubmitError};
use crate::form::validation::{validate, ValidationReport};
use crate::store::CreationToken;

/// Where the submission currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// Form visible and editable
    Idle,
    /// Insert in flight, submit control disabled
    Submitting,
    /// Entry stored; the thank-you view replaces the form
    Success { token: CreationToken },
}

impl SubmissionState {
    pub fn is_form_visible(&self) -> bool {
        !matches!(self, SubmissionState::Success { .. })
    }

    pub fn is_submit_enabled(&self) -> bool {
        matches!(self, SubmissionState::Idle)
    }
}

/// Result of one call to [`SubmissionController::submit`]
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Entry stored
    Created(CreationToken),
    /// Presence check failed, nothing was sent
    Invalid(ValidationReport),
    /// The insert call failed; the form is editable again
    Failed(SubmitError),
    /// An insert from an earlier call has not finished
    InFlight,
    /// This controller already stored its entry
    AlreadySubmitted,
}

/// Form state plus the sink its one entry goes to
pub struct SubmissionController<S> {
    sink: S,
    values: FormValues,
    state: watch::Sender<SubmissionState>,
    notice: Option<Notice>,
}

impl<S: EntrySink> SubmissionController<S> {
    /// Fresh form with default values
    pub fn new(sink: S) -> Self {
        Self::with_values(sink, FormValues::default())
    }

    /// Form pre-filled with `values`
    pub fn with_values(sink: S, values: FormValues) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self {
            sink,
            values,
            state,
            notice: None,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    /// Watch state transitions
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.values.name = name.into();
    }

    pub fn set_food(&mut self, food: impl Into<String>) {
        self.values.food = food.into();
    }

    /// Move the mood slider; values outside 1..=10 snap to the nearest end
    pub fn set_mood(&mut self, mood: i64) {
        self.values.mood = clamp_to_slider(mood);
    }

    pub fn set_water(&mut self, water: impl Into<String>) {
        self.values.water = water.into();
    }

    /// Emoji for the current mood, if it has one
    pub fn mood_emoji(&self) -> Option<&'static str> {
        mood_emoji(self.values.mood)
    }

    /// Notice waiting to be shown, if any
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Take the pending notice; it is shown once
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Validate and, if complete, insert the current values once
    pub async fn submit(&mut self) -> SubmitOutcome {
        let current = self.state.borrow().clone();
        match current {
            SubmissionState::Idle => {}
            SubmissionState::Submitting => {
                tracing::debug!("Submit ignored, insert already in flight");
                return SubmitOutcome::InFlight;
            }
            SubmissionState::Success { .. } => {
                tracing::debug!("Submit ignored, entry already stored");
                return SubmitOutcome::AlreadySubmitted;
            }
        }

        let report = validate(&self.values);
        if !report.is_ok() {
            tracing::info!(issues = %report, "Form incomplete, nothing sent");
            self.notice = Some(Notice::incomplete_form());
            return SubmitOutcome::Invalid(report);
        }

        self.notice = None;
        self.transition(SubmissionState::Submitting);

        let entry = self.values.to_entry();
        let in_flight = InFlight::new(&self.state);
        let result = match self.sink.insert(&entry).await {
            Ok(token) if token.is_truthy() => Ok(token),
            Ok(_) => Err(SubmitError::EmptyToken),
            Err(e) => Err(e),
        };
        in_flight.finish();

        match result {
            Ok(token) => {
                tracing::info!(entry_id = %token, "Entry submitted");
                self.transition(SubmissionState::Success {
                    token: token.clone(),
                });
                SubmitOutcome::Created(token)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Submission failed");
                self.notice = Some(Notice::submit_failed(&e));
                self.transition(SubmissionState::Idle);
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn transition(&self, next: SubmissionState) {
        let previous = self.state.send_replace(next);
        tracing::debug!(from = ?previous, to = ?*self.state.borrow(), "Submission state changed");
    }
}

/// Puts the form back to `Idle` if a submit is dropped mid-insert
struct InFlight<'a> {
    state: &'a watch::Sender<SubmissionState>,
    done: bool,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a watch::Sender<SubmissionState>) -> Self {
        Self { state, done: false }
    }

    fn finish(mut self) {
        self.done = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.done {
            tracing::warn!("Submit cancelled before the insert finished");
            self.state.send_replace(SubmissionState::Idle);
        }
    }
}
