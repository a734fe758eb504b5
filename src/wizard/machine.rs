//! Form wizard state machine
//!
//! Owns the inquiry's field values, the current step, the submission
//! status and the autosave bookkeeping. Edits are persisted after a quiet
//! period; step changes are persisted immediately.

use super::persistence::{PersistenceChannel, Snapshot, DRAFT_KEY};
use super::submit::{SubmissionEndpoint, SubmitError};
use super::timer::DebounceTimer;
use crate::state::{FieldName, FormState, InquiryFields, PersistenceMeta, Step, SubmissionStatus};
use chrono::Utc;
use std::time::Duration;

/// Default quiet period before an edit is written to the draft store
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(1000);

pub struct FormWizard {
    state: FormState,
    store: Box<dyn PersistenceChannel>,
    autosave: DebounceTimer,
}

impl FormWizard {
    pub fn new(store: Box<dyn PersistenceChannel>, autosave_delay: Duration) -> Self {
        Self {
            state: FormState::default(),
            store,
            autosave: DebounceTimer::new(autosave_delay),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn fields(&self) -> &InquiryFields {
        &self.state.fields
    }

    pub fn current_step(&self) -> Step {
        self.state.current_step
    }

    pub fn submission_status(&self) -> SubmissionStatus {
        self.state.submission_status
    }

    pub fn persistence_meta(&self) -> PersistenceMeta {
        self.state.persistence_meta
    }

    /// True while an edit is waiting for its quiet period to end
    pub fn is_autosave_pending(&self) -> bool {
        self.autosave.is_pending()
    }

    /// Load the stored draft, or start empty when there is none
    pub fn hydrate(&mut self) {
        self.autosave.cancel();
        self.state = match self.store.read(DRAFT_KEY) {
            Some(snapshot) => {
                tracing::debug!("Restored draft at step {}", snapshot.current_step.number());
                snapshot.restore()
            }
            None => FormState::default(),
        };
    }

    pub fn set_field(&mut self, name: FieldName, value: impl Into<String>) {
        *self.state.fields.get_mut(name) = value.into();
        tracing::trace!(field = name.key(), "Field edited");
        self.mark_dirty();
    }

    pub fn toggle_fabric_type(&mut self, fabric: &str) {
        self.state.fields.toggle_fabric_type(fabric);
        self.mark_dirty();
    }

    pub fn advance_step(&mut self) {
        self.state.current_step = self.state.current_step.next();
        self.save();
    }

    pub fn retreat_step(&mut self) {
        self.state.current_step = self.state.current_step.prev();
        self.save();
    }

    /// Save if the autosave quiet period has elapsed. Returns whether a save ran.
    pub fn poll_autosave(&mut self) -> bool {
        if self.autosave.fire_if_due() {
            self.save();
            true
        } else {
            false
        }
    }

    /// Save now if anything is unsaved
    pub fn flush(&mut self) {
        if self.state.persistence_meta.has_unsaved_changes {
            self.save();
        }
    }

    /// Write the full state to the draft store.
    /// Failures are logged and leave `has_unsaved_changes` set.
    pub fn save(&mut self) {
        self.autosave.cancel();
        let saved_at = Utc::now();
        let snapshot = Snapshot::capture(&self.state, saved_at);
        match self.store.write(DRAFT_KEY, &snapshot) {
            Ok(()) => {
                self.state.persistence_meta = PersistenceMeta {
                    last_saved_at: Some(saved_at),
                    has_unsaved_changes: false,
                };
                tracing::debug!("Draft saved at step {}", self.state.current_step.number());
            }
            Err(err) => tracing::warn!("Autosave failed: {err}"),
        }
    }

    /// Mark the inquiry as submitting and hand out the payload to send.
    /// Returns `None` while a submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<InquiryFields> {
        if self.state.submission_status == SubmissionStatus::Submitting {
            tracing::debug!("Submit ignored: a submission is already in flight");
            return None;
        }
        self.state.submission_status = SubmissionStatus::Submitting;
        Some(self.state.fields.clone())
    }

    /// Apply the endpoint's answer to an in-flight submission
    pub fn finish_submit(&mut self, result: Result<(), SubmitError>) {
        if self.state.submission_status != SubmissionStatus::Submitting {
            tracing::warn!("Submission result arrived with no submission in flight");
            return;
        }
        match result {
            Ok(()) => {
                tracing::info!("Inquiry submitted for {}", self.state.fields.company_name);
                self.clear_draft();
                self.state = FormState {
                    submission_status: SubmissionStatus::Succeeded,
                    ..Default::default()
                };
            }
            Err(err) => {
                tracing::warn!("Inquiry submission failed: {err}");
                self.state.submission_status = SubmissionStatus::Failed;
                self.flush();
            }
        }
    }

    /// Submit inline, awaiting the endpoint
    #[allow(dead_code)]
    pub async fn submit(&mut self, endpoint: &dyn SubmissionEndpoint) -> SubmissionStatus {
        if let Some(payload) = self.begin_submit() {
            let result = endpoint.send(&payload).await;
            self.finish_submit(result);
        }
        self.state.submission_status
    }

    /// Discard the inquiry and its stored draft
    pub fn reset(&mut self) {
        self.clear_draft();
        self.state = FormState::default();
        tracing::debug!("Inquiry reset");
    }

    /// Stop the autosave timer; nothing is written after this
    pub fn teardown(&mut self) {
        self.autosave.cancel();
    }

    fn mark_dirty(&mut self) {
        self.state.persistence_meta.has_unsaved_changes = true;
        self.autosave.schedule();
    }

    fn clear_draft(&mut self) {
        self.autosave.cancel();
        if let Err(err) = self.store.delete(DRAFT_KEY) {
            tracing::warn!("Could not remove stored draft: {err}");
        }
    }
}

impl Drop for FormWizard {
    fn drop(&mut self) {
        self.teardown();
    }
}
