//! Core domain logic for Jotpad.
//! This crate is the single source of truth for note invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{NewNote, Note, NoteChanges, NoteId, NoteValidationError};
pub use service::note_service::{NoteService, NoteServiceError};
pub use store::note_store::{NoteStore, SqliteNoteStore, StoreError, StoreResult};
