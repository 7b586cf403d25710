//! The four-state view flow: input → processing → result → dashboard.
//!
//! Transitions are a pure `(state, event)` function on [`Flow`]; the
//! rendering surface and the classify call live outside and only feed events
//! in. Events that don't match the current view are dropped, which is also
//! the late-response policy: a `Success` or `Failure` arriving after the
//! flow has left `Processing` is ignored.

use chrono::Utc;

use crate::archive::ArchiveStore;
use crate::error::ArchiveError;
use crate::model::AgencyResult;

/// The one generic user-facing failure message. Specific classifier error
/// kinds are logged, never shown.
pub const GENERIC_FAILURE: &str =
    "The Agency Engine encountered interference. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Input,
    Processing,
    Result,
    Dashboard,
}

#[derive(Debug, Clone)]
pub enum Event {
    /// User submitted free text. Guarded: ignored when empty after trim.
    Submit(String),
    /// Classify resolved with the generated fields; the flow stamps the
    /// timestamp and original input before showing it.
    Success(AgencyResult),
    /// Classify failed. The error kind is not carried here on purpose.
    Failure,
    /// "Log Achievement" / "Back to Archive". Idempotent on the timestamp.
    Commit,
    /// "Add new" from the dashboard. Does not clear the archive.
    NewEntry,
    /// Reopen a previously logged entry in review mode.
    OpenEntry(AgencyResult),
}

/// Transient UI state. The archive is the only durable state and is passed
/// in explicitly; there are no module-level singletons.
#[derive(Debug, Default)]
pub struct Flow {
    view: View,
    input: String,
    result: Option<AgencyResult>,
    error: Option<String>,
}

impl Default for View {
    fn default() -> Self {
        View::Input
    }
}

impl Flow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn result(&self) -> Option<&AgencyResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Review mode is derived, not stored: the current result is a review
    /// iff its timestamp is already committed.
    pub fn review_mode(&self, archive: &impl ArchiveStore) -> bool {
        self.result
            .as_ref()
            .and_then(|result| result.timestamp.as_deref())
            .is_some_and(|ts| archive.contains_timestamp(ts))
    }

    /// Advance the flow. Unmatched `(view, event)` pairs are no-ops.
    pub fn apply(
        &mut self,
        event: Event,
        archive: &mut impl ArchiveStore,
    ) -> Result<(), ArchiveError> {
        match (self.view, event) {
            (View::Input, Event::Submit(text)) => {
                if text.trim().is_empty() {
                    return Ok(());
                }
                self.input = text;
                self.error = None;
                self.view = View::Processing;
            }
            (View::Processing, Event::Success(raw)) => {
                let finalized =
                    raw.finalized(Utc::now().to_rfc3339(), self.input.clone());
                self.result = Some(finalized);
                self.view = View::Result;
            }
            (View::Processing, Event::Failure) => {
                self.result = None;
                self.error = Some(GENERIC_FAILURE.to_string());
                self.view = View::Input;
            }
            (View::Result, Event::Commit) => {
                if let Some(result) = self.result.take() {
                    archive.commit(result)?;
                }
                self.input.clear();
                self.view = View::Dashboard;
            }
            (View::Dashboard, Event::NewEntry) => {
                self.view = View::Input;
            }
            (View::Dashboard, Event::OpenEntry(item)) => {
                self.result = Some(item);
                self.view = View::Result;
            }
            _ => {}
        }
        Ok(())
    }
}
