use super::{DbError, DbResult};
use rusqlite::Connection;

/// Version stamped into `PRAGMA user_version` once the notes table exists.
pub const SCHEMA_VERSION: u32 = 1;

const NOTES_SCHEMA_SQL: &str = include_str!("notes_schema.sql");

/// Creates the notes table and indexes on a fresh database.
///
/// The DDL and the version stamp commit together.
pub(super) fn ensure_schema(conn: &Connection) -> DbResult<()> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    if found > SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew(found));
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(NOTES_SCHEMA_SQL)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;
    Ok(())
}
