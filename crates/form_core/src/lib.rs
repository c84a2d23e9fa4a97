//! In-memory person roster: a record store plus the validated-form state
//! machine driving it. Fully synchronous; every operation runs inside the
//! caller's event handler.

use std::collections::VecDeque;

use shared::domain::PersonId;
use tracing::debug;

pub mod draft;
pub mod store;

pub use draft::{DraftValidation, PersonDraft, MIN_COLOR_LEN, MIN_NAME_LEN};
pub use store::RecordStore;

/// Notification emitted by the controller after a successful mutation.
/// Fire-and-forget: the UI drains these into transient toasts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Submitted,
    Modified { name: String, surname: String },
    Deleted { name: String, surname: String },
}

/// The single data-entry form over the record store.
///
/// Two states: Idle (`editing == None`) and Editing a record by id. While
/// an edit is in progress the create path is blocked, and the rendered
/// list is expected to show the draft's live values for the edited record.
/// Out-of-state or invalid requests are refused silently; no controller
/// operation returns an error.
#[derive(Debug, Default)]
pub struct FormController {
    store: RecordStore,
    draft: PersonDraft,
    editing: Option<PersonId>,
    events: VecDeque<FormEvent>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn draft(&self) -> &PersonDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut PersonDraft {
        &mut self.draft
    }

    pub fn editing(&self) -> Option<PersonId> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Create path: a valid draft in the Idle state appends a record and
    /// clears the form. Returns whether a record was created.
    pub fn submit_create(&mut self) -> bool {
        if self.editing.is_some() {
            debug!("create submission refused: edit in progress");
            return false;
        }
        let Some(fields) = self.draft.to_fields() else {
            debug!("create submission refused: draft is invalid");
            return false;
        };
        let id = self.store.append(fields);
        self.draft.clear();
        self.events.push_back(FormEvent::Submitted);
        debug!(id = id.0, "person created from form submission");
        true
    }

    /// Begins editing the given record, populating the draft from its
    /// current values. An edit already in progress is discarded without
    /// committing. Unknown ids are ignored.
    pub fn start_edit(&mut self, id: PersonId) -> bool {
        let Some(person) = self.store.get(id) else {
            return false;
        };
        self.draft.populate_from(person);
        self.editing = Some(id);
        debug!(id = id.0, "editing person record");
        true
    }

    /// Edit-commit path: writes the draft's values onto the edited record
    /// in place and returns to Idle. Requires the same validity as the
    /// create path; an invalid draft leaves the edit in progress.
    pub fn commit_edit(&mut self) -> bool {
        let Some(id) = self.editing else {
            debug!("edit commit refused: no edit in progress");
            return false;
        };
        let Some(fields) = self.draft.to_fields() else {
            debug!(id = id.0, "edit commit refused: draft is invalid");
            return false;
        };
        let name = fields.name.clone();
        let surname = fields.surname.clone();
        let updated = self.store.update_in_place(id, fields);
        self.editing = None;
        self.draft.clear();
        if updated {
            self.events.push_back(FormEvent::Modified { name, surname });
            debug!(id = id.0, "person record modified");
        }
        updated
    }

    /// Removes the record everywhere, regardless of form state. Deleting
    /// the record currently under edit also cancels the edit and clears
    /// the draft. Unknown ids are ignored without a notification.
    pub fn delete_record(&mut self, id: PersonId) -> bool {
        let Some(person) = self.store.get(id) else {
            return false;
        };
        let name = person.fields.name.clone();
        let surname = person.fields.surname.clone();
        self.store.remove_all(id);
        if self.editing == Some(id) {
            self.editing = None;
            self.draft.clear();
            debug!(id = id.0, "deleted record was under edit; edit cancelled");
        }
        self.events.push_back(FormEvent::Deleted { name, surname });
        debug!(id = id.0, "person record deleted");
        true
    }

    /// Abandons the in-progress edit without touching the store. No-op in
    /// the Idle state.
    pub fn cancel_edit(&mut self) {
        if self.editing.take().is_some() {
            self.draft.clear();
            debug!("edit cancelled");
        }
    }

    /// Drains queued notifications, oldest first.
    pub fn drain_events(&mut self) -> Vec<FormEvent> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
