//! Client-side note list state.
//!
//! # Responsibility
//! - Mirror the server's note list, keyed by id, in newest-first order.
//! - Track the load status, the create dialog and per-note edit drafts.
//!
//! # Invariants
//! - State only changes through `NotesState::reduce`, which is pure.
//! - `order` and `notes` always hold the same set of ids.
//! - Edit drafts exist only for notes that are present.

use jotpad_core::{Note, NoteId};
use std::collections::HashMap;

/// List load lifecycle for one owner filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Success,
    /// Message shown to the user in place of the list.
    Error(String),
}

/// Title/content form used by both the create dialog and inline edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn from_note(note: &Note) -> Self {
        Self::new(note.title.clone(), note.content.clone())
    }

    /// The create dialog refuses to submit a blank title.
    pub fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotesAction {
    LoadStarted { owner_id: Option<String> },
    LoadSucceeded(Vec<Note>),
    LoadFailed(String),
    DialogOpened,
    DialogEdited(NoteDraft),
    DialogClosed,
    /// Server-confirmed create.
    NoteCreated(Note),
    EditStarted(NoteId),
    DraftEdited { id: NoteId, draft: NoteDraft },
    EditCancelled(NoteId),
    /// Server-confirmed update.
    NoteSaved(Note),
    /// Server-confirmed delete.
    NoteDeleted(NoteId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesState {
    owner_id: Option<String>,
    status: LoadStatus,
    notes: HashMap<NoteId, Note>,
    order: Vec<NoteId>,
    editing: HashMap<NoteId, NoteDraft>,
    /// `Some` while the create dialog is open.
    new_note: Option<NoteDraft>,
}

impl NotesState {
    /// Produces the next state for `action`.
    pub fn reduce(mut self, action: NotesAction) -> Self {
        match action {
            NotesAction::LoadStarted { owner_id } => {
                self.owner_id = owner_id;
                self.status = LoadStatus::Loading;
            }
            NotesAction::LoadSucceeded(notes) => {
                self.order = notes.iter().map(|note| note.id).collect();
                self.notes = notes.into_iter().map(|note| (note.id, note)).collect();
                self.editing.clear();
                self.status = LoadStatus::Success;
            }
            NotesAction::LoadFailed(message) => {
                self.status = LoadStatus::Error(message);
            }
            NotesAction::DialogOpened => {
                self.new_note.get_or_insert_with(NoteDraft::default);
            }
            NotesAction::DialogEdited(draft) => {
                if self.new_note.is_some() {
                    self.new_note = Some(draft);
                }
            }
            NotesAction::DialogClosed => {
                self.new_note = None;
            }
            NotesAction::NoteCreated(note) => {
                self.order.retain(|id| *id != note.id);
                self.order.insert(0, note.id);
                self.notes.insert(note.id, note);
                self.new_note = None;
            }
            NotesAction::EditStarted(id) => {
                if let Some(note) = self.notes.get(&id) {
                    self.editing.insert(id, NoteDraft::from_note(note));
                }
            }
            NotesAction::DraftEdited { id, draft } => {
                if let Some(current) = self.editing.get_mut(&id) {
                    *current = draft;
                }
            }
            NotesAction::EditCancelled(id) => {
                self.editing.remove(&id);
            }
            NotesAction::NoteSaved(note) => {
                self.editing.remove(&note.id);
                if let Some(current) = self.notes.get_mut(&note.id) {
                    *current = note;
                }
            }
            NotesAction::NoteDeleted(id) => {
                self.order.retain(|current| *current != id);
                self.notes.remove(&id);
                self.editing.remove(&id);
            }
        }
        self
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Notes in display order, newest first.
    pub fn notes(&self) -> impl Iterator<Item = &Note> + '_ {
        self.order.iter().filter_map(|id| self.notes.get(id))
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn draft(&self, id: NoteId) -> Option<&NoteDraft> {
        self.editing.get(&id)
    }

    pub fn is_editing(&self, id: NoteId) -> bool {
        self.editing.contains_key(&id)
    }

    /// Create dialog form, `None` when the dialog is closed.
    pub fn new_note_draft(&self) -> Option<&NoteDraft> {
        self.new_note.as_ref()
    }

    /// Loaded successfully and there is nothing to show.
    pub fn shows_empty_hint(&self) -> bool {
        self.status == LoadStatus::Success && self.is_empty()
    }
}
