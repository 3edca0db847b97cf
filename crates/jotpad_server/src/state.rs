use std::{path::PathBuf, sync::Arc};

use jotpad_core::{db::open_db, NoteService, NoteServiceError, SqliteNoteStore};
use log::info;
use tokio::task::spawn_blocking;

use crate::error::ApiError;

/// Shared, read-only server state.
///
/// Holds no connection: every request opens its own on the blocking pool, so
/// handlers never share a lock and SQLite serializes writers.
pub struct AppState {
    pub db_path: PathBuf,
}

impl AppState {
    /// Opens the database once so schema setup runs (and fails) at startup.
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Arc<Self>, ApiError> {
        let db_path = db_path.into();
        open_db(&db_path)?;
        info!(
            "event=store_ready module=server status=ok db_path={}",
            db_path.display()
        );

        Ok(Arc::new(Self { db_path }))
    }

    /// Runs `f` against a request-scoped note service.
    pub async fn with_service<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&NoteService<SqliteNoteStore<'_>>) -> Result<T, NoteServiceError>
            + Send
            + 'static,
    {
        let db_path = self.db_path.clone();

        spawn_blocking(move || {
            let conn = open_db(&db_path)?;
            let service = NoteService::new(SqliteNoteStore::try_new(&conn)?);
            f(&service).map_err(ApiError::from)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("store task failed: {err}")))?
    }
}
