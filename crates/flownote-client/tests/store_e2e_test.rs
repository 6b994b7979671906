//! End-to-end store tests: remote backend against a live API server, and the
//! local backend against a temporary data directory.

use std::sync::Arc;

use flownote_api::{app, ApiConfig, AppState};
use flownote_client::{LocalBackend, NoteStore, RemoteBackend};
use flownote_core::{pinned_first, EditorInput, NoteCategory, NoteDraft, NoteFilters, NotePatch};
use flownote_db::InMemoryNoteRepository;

async fn spawn_api() -> String {
    let state = AppState::new(Arc::new(InMemoryNoteRepository::new()));
    let router = app(state, &ApiConfig::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}/api/notes", addr)
}

async fn remote_store(url: &str) -> NoteStore {
    NoteStore::open(Box::new(RemoteBackend::new(url))).await.unwrap()
}

#[tokio::test]
async fn test_remote_create_on_empty_server() {
    let url = spawn_api().await;
    let mut store = remote_store(&url).await;
    assert!(store.list().is_empty());

    let draft = NoteDraft::new(NoteCategory::Ideas).title("A");
    let note = store.create(draft).await.unwrap();

    assert_eq!(store.list().len(), 1);
    assert_eq!(note.title, "A");
    assert_eq!(note.category, NoteCategory::Ideas);
    assert!(!note.is_pinned);
    assert_eq!(note.created_at, note.updated_at);
}

#[tokio::test]
async fn test_remote_session_matches_fresh_load() {
    let url = spawn_api().await;
    let mut store = remote_store(&url).await;

    let first = store
        .create(NoteDraft::new(NoteCategory::Work).title("Meeting Notes - Q1 Planning"))
        .await
        .unwrap();
    let second = store
        .create(NoteDraft::new(NoteCategory::Personal).title("Groceries").tags(["Meeting"]))
        .await
        .unwrap();
    store.toggle_pin(&first.id).await.unwrap();
    store
        .update(&second.id, NotePatch {
            content: Some("milk, eggs".to_string()),
            ..NotePatch::default()
        })
        .await
        .unwrap();

    // A second session sees exactly what the first one holds
    let fresh = remote_store(&url).await;
    assert_eq!(fresh.list(), store.list());

    let rendered: Vec<&str> = pinned_first(store.list())
        .into_iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(rendered, vec![first.id.as_str(), second.id.as_str()]);

    let listed: Vec<&str> = store.list().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(listed, vec![second.id.as_str(), first.id.as_str()]);

    let found = store.filter(&NoteFilters::by_search("meeting"));
    assert_eq!(found.len(), 2);
}

#[tokio::test]
async fn test_remote_delete_then_get_is_not_found() {
    let url = spawn_api().await;
    let mut store = remote_store(&url).await;

    let note = store
        .create(NoteDraft::new(NoteCategory::Tasks).title("done"))
        .await
        .unwrap();
    store.delete(&note.id).await.unwrap();

    assert!(store.get(&note.id).unwrap_err().is_not_found());
    assert!(remote_store(&url).await.list().is_empty());
}

#[tokio::test]
async fn test_remote_stale_session_surfaces_server_error() {
    let url = spawn_api().await;
    let mut a = remote_store(&url).await;
    let note = a
        .create(NoteDraft::new(NoteCategory::Work).title("shared"))
        .await
        .unwrap();

    let mut b = remote_store(&url).await;
    b.delete(&note.id).await.unwrap();

    // Session `a` still holds the note; the server answers 500
    let err = a.toggle_pin(&note.id).await.unwrap_err();
    assert!(err.is_persistence());
    assert!(!a.get(&note.id).unwrap().is_pinned);
}

#[tokio::test]
async fn test_local_store_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = NoteStore::open(Box::new(LocalBackend::in_dir(dir.path())))
        .await
        .unwrap();
    let seeded = store.list().len();
    assert!(seeded > 0);

    let input = EditorInput {
        title: "  ".to_string(),
        content: "remember the milk".to_string(),
        category: NoteCategory::Tasks,
        tags_input: "errands, , home".to_string(),
        is_pinned: false,
    };
    let note = store.create(input.to_draft().unwrap()).await.unwrap();
    assert_eq!(note.title, "Untitled Note");
    assert_eq!(note.tags, vec!["errands", "home"]);

    store.toggle_pin(&note.id).await.unwrap();

    let reopened = NoteStore::open(Box::new(LocalBackend::in_dir(dir.path())))
        .await
        .unwrap();
    assert_eq!(reopened.list().len(), seeded + 1);
    assert_eq!(reopened.list()[0].id, note.id);
    assert!(reopened.get(&note.id).unwrap().is_pinned);
    assert_eq!(reopened.list(), store.list());
}

#[tokio::test]
async fn test_local_delete_is_written_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = NoteStore::open(Box::new(LocalBackend::in_dir(dir.path())))
        .await
        .unwrap();
    let id = store.list()[0].id.clone();

    store.delete(&id).await.unwrap();
    assert!(store.delete(&id).await.unwrap_err().is_not_found());

    let reopened = NoteStore::open(Box::new(LocalBackend::in_dir(dir.path())))
        .await
        .unwrap();
    assert!(reopened.get(&id).unwrap_err().is_not_found());
}
