//! Notes dashboard controller.
//!
//! # Responsibility
//! - Drive `NotesState` from user intents and gateway results.
//! - Fetch the list on mount and whenever the owner filter changes.
//!
//! # Invariants
//! - Local state changes only after the server confirms a write.
//! - A blank create title never reaches the gateway.
//! - Cancelling an edit never calls the gateway.

use crate::api::{ClientError, NotesGateway};
use crate::state::{NoteDraft, NotesAction, NotesState};
use jotpad_core::{NewNote, Note, NoteChanges, NoteId};
use log::{info, warn};

pub struct Dashboard<G: NotesGateway> {
    gateway: G,
    state: NotesState,
}

impl<G: NotesGateway> Dashboard<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: NotesState::default(),
        }
    }

    pub fn state(&self) -> &NotesState {
        &self.state
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Initial load for `owner_id`.
    pub async fn mount(&mut self, owner_id: Option<String>) {
        self.reload(owner_id).await;
    }

    /// Refetches only when the owner filter actually changes.
    pub async fn set_owner(&mut self, owner_id: Option<String>) {
        if self.state.owner_id() == owner_id.as_deref() {
            return;
        }
        self.reload(owner_id).await;
    }

    async fn reload(&mut self, owner_id: Option<String>) {
        self.dispatch(NotesAction::LoadStarted {
            owner_id: owner_id.clone(),
        });

        match self.gateway.list(owner_id.as_deref()).await {
            Ok(notes) => {
                info!(
                    "event=notes_load module=dashboard status=ok count={}",
                    notes.len()
                );
                self.dispatch(NotesAction::LoadSucceeded(notes));
            }
            Err(err) => {
                warn!("event=notes_load module=dashboard status=error error={err}");
                self.dispatch(NotesAction::LoadFailed(err.to_string()));
            }
        }
    }

    pub fn open_dialog(&mut self) {
        self.dispatch(NotesAction::DialogOpened);
    }

    pub fn edit_dialog(&mut self, draft: NoteDraft) {
        self.dispatch(NotesAction::DialogEdited(draft));
    }

    pub fn close_dialog(&mut self) {
        self.dispatch(NotesAction::DialogClosed);
    }

    /// Submits the create dialog.
    ///
    /// Returns `Ok(None)` without calling the gateway when the dialog is
    /// closed or its title is blank. On failure the dialog stays open.
    pub async fn submit_new_note(&mut self) -> Result<Option<Note>, ClientError> {
        let Some(draft) = self.state.new_note_draft().cloned() else {
            return Ok(None);
        };
        if !draft.is_submittable() {
            return Ok(None);
        }

        let request =
            NewNote::new(draft.title, draft.content).owned_by(self.state.owner_id());
        let created = self.gateway.create(&request).await.map_err(|err| {
            warn!("event=note_create module=dashboard status=error error={err}");
            err
        })?;

        self.dispatch(NotesAction::NoteCreated(created.clone()));
        Ok(Some(created))
    }

    pub fn start_edit(&mut self, id: NoteId) {
        self.dispatch(NotesAction::EditStarted(id));
    }

    pub fn edit_draft(&mut self, id: NoteId, draft: NoteDraft) {
        self.dispatch(NotesAction::DraftEdited { id, draft });
    }

    pub fn cancel_edit(&mut self, id: NoteId) {
        self.dispatch(NotesAction::EditCancelled(id));
    }

    /// Sends the edit draft for `id`.
    ///
    /// Returns `Ok(None)` when the note is not in edit mode. On failure the
    /// note stays in edit mode with its draft intact.
    pub async fn save_edit(&mut self, id: NoteId) -> Result<Option<Note>, ClientError> {
        let Some(draft) = self.state.draft(id).cloned() else {
            return Ok(None);
        };

        let changes = NoteChanges::replace(draft.title, draft.content);
        let saved = self.gateway.update(id, &changes).await.map_err(|err| {
            warn!("event=note_update module=dashboard status=error note_id={id} error={err}");
            err
        })?;

        self.dispatch(NotesAction::NoteSaved(saved.clone()));
        Ok(Some(saved))
    }

    /// Deletes `id` on the server, then drops it locally.
    pub async fn delete(&mut self, id: NoteId) -> Result<(), ClientError> {
        self.gateway.remove(id).await.map_err(|err| {
            warn!("event=note_delete module=dashboard status=error note_id={id} error={err}");
            err
        })?;

        self.dispatch(NotesAction::NoteDeleted(id));
        Ok(())
    }

    fn dispatch(&mut self, action: NotesAction) {
        self.state = std::mem::take(&mut self.state).reduce(action);
    }
}
