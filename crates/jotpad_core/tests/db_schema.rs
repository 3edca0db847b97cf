use jotpad_core::db::{open_db, open_db_in_memory, DbError, SCHEMA_VERSION};
use rusqlite::{params, Connection};

#[test]
fn reopening_a_file_keeps_notes_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jotpad.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        insert_raw(&conn, "n1", 1_000, 1_000).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let version: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap();
    assert_eq!(version, SCHEMA_VERSION);
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn schema_from_a_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    Connection::open(&path)
        .unwrap()
        .pragma_update(None, "user_version", SCHEMA_VERSION + 1)
        .unwrap();

    match open_db(&path).unwrap_err() {
        DbError::SchemaTooNew(found) => assert_eq!(found, SCHEMA_VERSION + 1),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn updated_at_before_created_at_is_rejected() {
    let conn = open_db_in_memory().unwrap();

    let err = insert_raw(&conn, "n1", 2_000, 1_999).unwrap_err();
    assert!(err.to_string().contains("CHECK"), "{err}");
    assert!(insert_raw(&conn, "n2", 2_000, 2_000).is_ok());
}

#[test]
fn content_defaults_to_empty_string() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO notes (uuid, title, created_at, updated_at) VALUES ('n1', 't', 1, 1);",
        [],
    )
    .unwrap();

    let (content, owner): (String, Option<String>) = conn
        .query_row(
            "SELECT content, owner_id FROM notes WHERE uuid = 'n1';",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(content, "");
    assert_eq!(owner, None);
}

#[test]
fn owner_listing_uses_owner_index() {
    let conn = open_db_in_memory().unwrap();
    let mut stmt = conn
        .prepare(
            "EXPLAIN QUERY PLAN
             SELECT uuid FROM notes WHERE owner_id = ?1 ORDER BY created_at DESC, rowid DESC;",
        )
        .unwrap();
    let details: Vec<String> = stmt
        .query_map(["alice"], |row| row.get(3))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert!(
        details
            .iter()
            .any(|detail| detail.contains("idx_notes_owner_created")),
        "{details:?}"
    );
}

fn insert_raw(
    conn: &Connection,
    uuid: &str,
    created_at: i64,
    updated_at: i64,
) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO notes (uuid, title, content, created_at, updated_at)
         VALUES (?1, 'title', 'body', ?2, ?3);",
        params![uuid, created_at, updated_at],
    )
}
