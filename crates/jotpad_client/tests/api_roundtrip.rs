use jotpad_client::{ClientError, Dashboard, LoadStatus, NoteDraft, NotesApi, NotesGateway};
use jotpad_core::{NewNote, NoteChanges};
use jotpad_server::{build_router, cors_layer, state::AppState};
use tempfile::TempDir;
use tokio::net::TcpListener;
use uuid::Uuid;

async fn spawn_server() -> (String, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(dir.path().join("notes.sqlite3")).unwrap();
    let app = build_router(state, cors_layer(None).unwrap());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(jotpad_server::run(listener, app, std::future::pending()));

    (format!("http://{address}"), dir)
}

#[tokio::test]
async fn api_client_covers_note_lifecycle() {
    let (base_url, _dir) = spawn_server().await;
    let api = NotesApi::new(&base_url).unwrap();

    let created = api
        .create(&NewNote::new("groceries", "milk").owned_by(Some("u1")))
        .await
        .unwrap();
    assert_eq!(created.title, "groceries");
    assert_eq!(created.owner_id.as_deref(), Some("u1"));

    api.create(&NewNote::new("other", "").owned_by(Some("u2")))
        .await
        .unwrap();

    let mine = api.list(Some("u1")).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, created.id);
    assert_eq!(api.list(None).await.unwrap().len(), 2);

    let updated = api
        .update(created.id, &NoteChanges::replace("groceries", "milk, eggs"))
        .await
        .unwrap();
    assert_eq!(updated.content, "milk, eggs");
    assert!(updated.updated_at > created.updated_at);

    api.remove(created.id).await.unwrap();
    assert!(api.list(Some("u1")).await.unwrap().is_empty());
}

#[tokio::test]
async fn server_errors_map_to_http_variant() {
    let (base_url, _dir) = spawn_server().await;
    let api = NotesApi::new(&base_url).unwrap();

    let err = api.create(&NewNote::new("  ", "body")).await.unwrap_err();
    match err {
        ClientError::Http { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "title is required");
        }
        other => panic!("unexpected error: {other}"),
    }

    let missing = Uuid::new_v4();
    let err = api
        .update(missing, &NoteChanges::replace("t", "c"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));

    let err = api.remove(missing).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let api = NotesApi::new(&format!("http://{address}")).unwrap();
    let err = api.list(None).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));

    let mut dashboard = Dashboard::new(api);
    dashboard.mount(None).await;
    assert!(matches!(dashboard.state().status(), LoadStatus::Error(_)));
}

#[tokio::test]
async fn dashboard_drives_real_server() {
    let (base_url, _dir) = spawn_server().await;
    let mut dashboard = Dashboard::new(NotesApi::new(&base_url).unwrap());
    dashboard.mount(Some("u1".to_string())).await;
    assert!(dashboard.state().shows_empty_hint());

    for title in ["first", "second"] {
        dashboard.open_dialog();
        dashboard.edit_dialog(NoteDraft::new(title, "body"));
        dashboard.submit_new_note().await.unwrap().unwrap();
    }

    let target = dashboard.state().notes().nth(1).unwrap().id;
    dashboard.start_edit(target);
    dashboard.edit_draft(target, NoteDraft::new("first, edited", "body"));
    dashboard.save_edit(target).await.unwrap().unwrap();

    let newest = dashboard.state().notes().next().unwrap().id;
    dashboard.delete(newest).await.unwrap();

    // A fresh load must agree with the locally reduced state.
    let mut reloaded = Dashboard::new(NotesApi::new(&base_url).unwrap());
    reloaded.mount(Some("u1".to_string())).await;
    let titles: Vec<_> = reloaded
        .state()
        .notes()
        .map(|note| note.title.clone())
        .collect();
    assert_eq!(titles, vec!["first, edited".to_string()]);
    assert_eq!(
        dashboard.state().notes().cloned().collect::<Vec<_>>(),
        reloaded.state().notes().cloned().collect::<Vec<_>>()
    );
}
