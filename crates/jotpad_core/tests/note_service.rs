use jotpad_core::db::open_db_in_memory;
use jotpad_core::{NewNote, NoteChanges, NoteService, NoteServiceError, SqliteNoteStore};
use uuid::Uuid;

#[test]
fn create_list_update_delete_lifecycle() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::new(SqliteNoteStore::try_new(&conn).unwrap());

    let created = service.create_note(NewNote::new("A", "x")).unwrap();
    let listed = service.list_notes(None).unwrap();
    assert_eq!(listed.first().map(|note| note.id), Some(created.id));

    let updated = service
        .update_note(created.id, NoteChanges::replace("B", "y"))
        .unwrap();
    assert_eq!(updated.title, "B");
    assert_eq!(
        service.get_note(created.id).unwrap().map(|note| note.title),
        Some("B".to_string())
    );

    service.delete_note(created.id).unwrap();
    assert!(service.list_notes(None).unwrap().is_empty());
}

#[test]
fn create_with_blank_title_maps_to_invalid_title() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::new(SqliteNoteStore::try_new(&conn).unwrap());

    let err = service.create_note(NewNote::new("  ", "body")).unwrap_err();
    assert!(matches!(err, NoteServiceError::InvalidTitle));
}

#[test]
fn missing_ids_map_to_note_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::new(SqliteNoteStore::try_new(&conn).unwrap());
    let missing = Uuid::new_v4();

    let update_err = service
        .update_note(missing, NoteChanges::replace("B", "y"))
        .unwrap_err();
    assert!(matches!(update_err, NoteServiceError::NoteNotFound(id) if id == missing));

    let delete_err = service.delete_note(missing).unwrap_err();
    assert!(matches!(delete_err, NoteServiceError::NoteNotFound(id) if id == missing));
}

#[test]
fn blank_owner_filter_lists_everything() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::new(SqliteNoteStore::try_new(&conn).unwrap());
    service
        .create_note(NewNote::new("mine", "").owned_by(Some("u1")))
        .unwrap();
    service
        .create_note(NewNote::new("theirs", "").owned_by(Some("u2")))
        .unwrap();

    assert_eq!(service.list_notes(Some(String::new())).unwrap().len(), 2);
    assert_eq!(service.list_notes(Some("u2".to_string())).unwrap().len(), 1);
}
