//! Domain model for notes.
//!
//! # Responsibility
//! - Define the note record and request shapes used across crates.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod note;
