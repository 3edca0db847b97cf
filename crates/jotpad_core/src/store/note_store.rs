//! Note store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide keyed CRUD over the `notes` table.
//! - Serve owner-filtered listings through the `(owner_id, created_at)` index.
//!
//! # Invariants
//! - `insert` rejects blank titles; `update_by_id` does not re-validate.
//! - Listings are ordered by `created_at DESC`, newest insert first on ties.
//! - Every successful update moves `updated_at` strictly forward.
//! - An update and the note it returns come from one statement.
//! - No transactions or version tokens: concurrent writers race and the
//!   last write wins.

use crate::db::DbError;
use crate::model::note::{
    normalize_owner_id, normalize_title, NewNote, Note, NoteChanges, NoteId, NoteValidationError,
};
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const NOTE_SELECT_SQL: &str = "SELECT
    uuid,
    owner_id,
    title,
    content,
    created_at,
    updated_at
FROM notes";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for note persistence and query operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(NoteValidationError),
    Db(DbError),
    NotFound(NoteId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Store interface for note records.
pub trait NoteStore {
    /// Lists notes newest-first, optionally limited to one owner.
    fn find_by_owner(&self, owner_id: Option<&str>) -> StoreResult<Vec<Note>>;
    /// Inserts a note with a fresh id and timestamps.
    fn insert(&self, note: &NewNote) -> StoreResult<Note>;
    /// Replaces the given fields and refreshes `updated_at`.
    fn update_by_id(&self, id: NoteId, changes: &NoteChanges) -> StoreResult<Note> {
        let title = changes.title.as_deref().map(str::trim);
        let result = self.conn.query_row(
            "UPDATE notes
             SET
                title = COALESCE(?2, title),
                content = COALESCE(?3, content),
                updated_at = MAX(?4, updated_at + 1)
             WHERE uuid = ?1
             RETURNING
                uuid,
                owner_id,
                title,
                content,
                created_at,
                updated_at;",
            params![
                id.to_string(),
                title,
                changes.content.as_deref(),
                now_millis(),
            ],
            |row| Ok(parse_note_row(row)),
        );

        match result {
            Ok(note) => note,
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    fn delete_by_id(&self, id: NoteId) -> StoreResult<bool>;
    /// Gets one note by id.
    fn get_by_id(&self, id: NoteId) -> StoreResult<Option<Note>>;
}

/// SQLite-backed note store.
pub struct SqliteNoteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteStore<'conn> {
    /// Constructs a store from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        if !table_exists(conn, "notes")? {
            return Err(StoreError::MissingRequiredTable("notes"));
        }
        Ok(Self { conn })
    }
}

impl NoteStore for SqliteNoteStore<'_> {
    fn find_by_owner(&self, owner_id: Option<&str>) -> StoreResult<Vec<Note>> {
        let mut sql = String::from(NOTE_SELECT_SQL);
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(owner_id) = owner_id {
            sql.push_str(" WHERE owner_id = ?");
            bind_values.push(Value::Text(owner_id.to_string()));
        }
        sql.push_str(" ORDER BY created_at DESC, rowid DESC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }

    fn insert(&self, note: &NewNote) -> StoreResult<Note> {
        let title = normalize_title(&note.title)?;
        let owner_id = normalize_owner_id(note.owner_id.clone());
        let id = Uuid::new_v4();
        let now = now_millis();

        self.conn.execute(
            "INSERT INTO notes (
                uuid,
                owner_id,
                title,
                content,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?5);",
            params![
                id.to_string(),
                owner_id.as_deref(),
                title.as_str(),
                note.content.as_str(),
                now,
            ],
        )?;

        let stamp = millis_to_datetime(now, "created_at")?;
        Ok(Note {
            id,
            owner_id,
            title,
            content: note.content.clone(),
            created_at: stamp,
            updated_at: stamp,
        })
    }

    fn update_by_id(&self, id: NoteId, changes: &NoteChanges) -> StoreResult<Note> {
        let title = changes.title.as_deref().map(str::trim);
        let changed = self.conn.execute(
            "UPDATE notes
             SET
                title = COALESCE(?2, title),
                content = COALESCE(?3, content),
                updated_at = MAX(?4, updated_at + 1)
             WHERE uuid = ?1;",
            params![
                id.to_string(),
                title,
                changes.content.as_deref(),
                now_millis(),
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        self.get_by_id(id)?.ok_or_else(|| {
            StoreError::InvalidData(format!("updated note {id} missing in read-back"))
        })
    }

    fn delete_by_id(&self, id: NoteId) -> StoreResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE uuid = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }

    fn get_by_id(&self, id: NoteId) -> StoreResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }
        Ok(None)
    }
}

fn parse_note_row(row: &Row<'_>) -> StoreResult<Note> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        StoreError::InvalidData(format!("invalid uuid value `{uuid_text}` in notes.uuid"))
    })?;

    let created_at = millis_to_datetime(row.get("created_at")?, "created_at")?;
    let updated_at = millis_to_datetime(row.get("updated_at")?, "updated_at")?;

    Ok(Note {
        id,
        owner_id: row.get("owner_id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        created_at,
        updated_at,
    })
}

fn millis_to_datetime(value: i64, column: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value).ok_or_else(|| {
        StoreError::InvalidData(format!("timestamp `{value}` out of range in notes.{column}"))
    })
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
