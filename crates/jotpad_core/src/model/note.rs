//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record and its JSON wire shape.
//! - Define create/update request models shared by server and client.
//! - Own title normalization rules.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - A created note always has a non-blank, trimmed title.
//! - `created_at <= updated_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every note.
pub type NoteId = Uuid;

/// Canonical note record.
///
/// Serialized as `{_id, userId?, title, content, createdAt, updatedAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Store-assigned identifier.
    #[serde(rename = "_id")]
    pub id: NoteId,
    /// Unverified owner key supplied by the caller. Only used for filtering.
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for note creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            owner_id: None,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Attaches an owner key, dropping blank values.
    pub fn owned_by(mut self, owner_id: Option<impl Into<String>>) -> Self {
        self.owner_id = normalize_owner_id(owner_id.map(Into::into));
        self
    }
}

/// Partial replacement for an existing note.
///
/// `None` keeps the stored value. `Some` replaces it without re-validation,
/// so an update may store an empty title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl NoteChanges {
    /// Full replacement of title and content.
    pub fn replace(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }
}

/// Validation failures for note input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Title is empty after whitespace trimming.
    BlankTitle,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "title must not be blank"),
        }
    }
}

impl Error for NoteValidationError {}

/// Trims a title and rejects blank values.
pub fn normalize_title(title: &str) -> Result<String, NoteValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(NoteValidationError::BlankTitle);
    }
    Ok(trimmed.to_string())
}

/// Treats blank owner keys as absent.
pub fn normalize_owner_id(owner_id: Option<String>) -> Option<String> {
    owner_id.filter(|value| !value.trim().is_empty())
}
