//! Note use-case service.
//!
//! # Responsibility
//! - Provide list/create/update/delete entry points over a `NoteStore`.
//! - Translate store errors into use-case errors callers can map to
//!   transport status codes.
//!
//! # Invariants
//! - Title is validated on create only.
//! - Log events carry ids and counts, never titles or content.

use crate::model::note::{normalize_owner_id, NewNote, Note, NoteChanges, NoteId};
use crate::store::note_store::{NoteStore, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Title is missing or blank on create.
    InvalidTitle,
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle => write!(f, "title is required"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Validation(_) => Self::InvalidTitle,
            StoreError::NotFound(id) => Self::NoteNotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Note service facade over store implementations.
pub struct NoteService<S: NoteStore> {
    store: S,
}

impl<S: NoteStore> NoteService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists notes newest-first. A blank owner filter means no filter.
    pub fn list_notes(&self, owner_id: Option<String>) -> Result<Vec<Note>, NoteServiceError> {
        let owner_id = normalize_owner_id(owner_id);
        let notes = self.store.find_by_owner(owner_id.as_deref())?;
        info!(
            "event=note_list module=service status=ok filtered={} count={}",
            owner_id.is_some(),
            notes.len()
        );
        Ok(notes)
    }

    /// Creates one note. Fails with `InvalidTitle` when the title is blank.
    pub fn create_note(&self, note: NewNote) -> Result<Note, NoteServiceError> {
        let created = self.store.insert(&note)?;
        info!(
            "event=note_create module=service status=ok note_id={}",
            created.id
        );
        Ok(created)
    }

    /// Applies `changes` to an existing note and returns the stored result.
    pub fn update_note(&self, id: NoteId, changes: NoteChanges) -> Result<Note, NoteServiceError> {
        let updated = self.store.update_by_id(id, &changes)?;
        info!("event=note_update module=service status=ok note_id={id}");
        Ok(updated)
    }

    /// Deletes one note. Fails with `NoteNotFound` when nothing was removed.
    pub fn delete_note(&self, id: NoteId) -> Result<(), NoteServiceError> {
        if !self.store.delete_by_id(id)? {
            return Err(NoteServiceError::NoteNotFound(id));
        }
        info!("event=note_delete module=service status=ok note_id={id}");
        Ok(())
    }

    /// Gets one note by id.
    pub fn get_note(&self, id: NoteId) -> Result<Option<Note>, NoteServiceError> {
        Ok(self.store.get_by_id(id)?)
    }
}
