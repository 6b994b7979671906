//! Notes REST API tests.
//!
//! Each test spawns the full router on an ephemeral port backed by the
//! in-memory repository and talks to it over HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use flownote_api::{app, ApiConfig, AppState};
use flownote_core::{Error, Note, NoteDraft, NotePatch, NoteRepository, Result};
use flownote_db::InMemoryNoteRepository;

async fn spawn_server(notes: Arc<dyn NoteRepository>) -> String {
    let router = app(AppState::new(notes), &ApiConfig::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn spawn_memory_server() -> String {
    spawn_server(Arc::new(InMemoryNoteRepository::new())).await
}

async fn create(client: &reqwest::Client, base: &str, body: Value) -> Note {
    let resp = client
        .post(format!("{base}/api/notes"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.unwrap()
}

/// Repository whose every call fails with a storage error.
struct FailingRepository;

#[async_trait]
impl NoteRepository for FailingRepository {
    async fn insert(&self, _draft: NoteDraft) -> Result<Note> {
        Err(Error::Persistence("disk on fire".to_string()))
    }
    async fn list(&self) -> Result<Vec<Note>> {
        Err(Error::Persistence("disk on fire".to_string()))
    }
    async fn fetch(&self, _id: &str) -> Result<Note> {
        Err(Error::Persistence("disk on fire".to_string()))
    }
    async fn update(&self, _id: &str, _patch: NotePatch) -> Result<Note> {
        Err(Error::Persistence("disk on fire".to_string()))
    }
    async fn delete(&self, _id: &str) -> Result<()> {
        Err(Error::Persistence("disk on fire".to_string()))
    }
}

#[tokio::test]
async fn test_root_and_health() {
    let base = spawn_memory_server().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "FlowNote API is running");

    let health: Value = client
        .get(format!("{base}/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "healthy");
}

#[tokio::test]
async fn test_create_returns_note_with_server_fields() {
    let base = spawn_memory_server().await;
    let client = reqwest::Client::new();

    let note = create(
        &client,
        &base,
        json!({"title": "A", "content": "", "category": "ideas", "tags": ["x"]}),
    )
    .await;

    assert!(!note.id.is_empty());
    assert_eq!(note.title, "A");
    assert_eq!(note.tags, vec!["x"]);
    assert!(!note.is_pinned);
    assert_eq!(note.created_at, note.updated_at);
}

#[tokio::test]
async fn test_create_response_uses_camel_case() {
    let base = spawn_memory_server().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .post(format!("{base}/api/notes"))
        .json(&json!({"title": "A", "category": "work"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(body.get("createdAt").is_some());
    assert!(body.get("updatedAt").is_some());
    assert_eq!(body["isPinned"], false);
    assert_eq!(body["category"], "work");
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let base = spawn_memory_server().await;
    let client = reqwest::Client::new();

    let first = create(&client, &base, json!({"title": "first", "category": "work"})).await;
    let second = create(&client, &base, json!({"title": "second", "category": "work"})).await;

    let notes: Vec<Note> = client
        .get(format!("{base}/api/notes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let ids: Vec<&str> = notes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
}

#[tokio::test]
async fn test_get_existing_and_missing() {
    let base = spawn_memory_server().await;
    let client = reqwest::Client::new();

    let note = create(&client, &base, json!({"title": "x", "category": "tasks"})).await;

    let fetched: Note = client
        .get(format!("{base}/api/notes/{}", note.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, note);

    let resp = client
        .get(format!("{base}/api/notes/does-not-exist"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"error": "Note not found"}));
}

#[tokio::test]
async fn test_partial_update_preserves_other_fields() {
    let base = spawn_memory_server().await;
    let client = reqwest::Client::new();

    let note = create(
        &client,
        &base,
        json!({"title": "keep", "content": "body", "category": "personal", "tags": ["a"]}),
    )
    .await;

    let resp = client
        .put(format!("{base}/api/notes/{}", note.id))
        .json(&json!({"isPinned": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Note = resp.json().await.unwrap();

    assert!(updated.is_pinned);
    assert_eq!(updated.title, "keep");
    assert_eq!(updated.content, "body");
    assert_eq!(updated.tags, vec!["a"]);
    assert_eq!(updated.created_at, note.created_at);
    assert!(updated.updated_at >= note.updated_at);
}

#[tokio::test]
async fn test_update_missing_is_500() {
    let base = spawn_memory_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/api/notes/missing"))
        .json(&json!({"title": "x"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to update note");
}

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let base = spawn_memory_server().await;
    let client = reqwest::Client::new();

    let note = create(&client, &base, json!({"title": "gone", "category": "ideas"})).await;

    let resp = client
        .delete(format!("{base}/api/notes/{}", note.id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"message": "Note deleted successfully"}));

    let resp = client
        .get(format!("{base}/api/notes/{}", note.id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_is_500() {
    let base = spawn_memory_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .delete(format!("{base}/api/notes/missing"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to delete note");
}

#[tokio::test]
async fn test_storage_failures_map_to_500_messages() {
    let base = spawn_server(Arc::new(FailingRepository)).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/notes"))
        .json(&json!({"title": "x", "category": "work"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to create note");
    assert!(body["details"].as_str().unwrap().contains("disk on fire"));

    let resp = client.get(format!("{base}/api/notes")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch notes");

    let resp = client
        .get(format!("{base}/api/notes/any"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch note");
}

#[tokio::test]
async fn test_create_with_unusable_body_is_500_json() {
    let base = spawn_memory_server().await;
    let client = reqwest::Client::new();

    for (body, mentions) in [
        (json!({"title": "x"}), "category"),
        (json!({"title": "x", "category": "groceries"}), "groceries"),
    ] {
        let resp = client
            .post(format!("{base}/api/notes"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Failed to create note");
        assert!(body["details"].as_str().unwrap().contains(mentions));
    }

    let resp = client
        .post(format!("{base}/api/notes"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to create note");

    let notes: Vec<Note> = client
        .get(format!("{base}/api/notes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(notes.is_empty());
}

#[tokio::test]
async fn test_update_with_unknown_category_is_500_and_keeps_note() {
    let base = spawn_memory_server().await;
    let client = reqwest::Client::new();

    let note = create(&client, &base, json!({"title": "stay", "category": "work"})).await;

    let resp = client
        .put(format!("{base}/api/notes/{}", note.id))
        .json(&json!({"category": "groceries"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"error": "Failed to update note"}));

    let stored: Note = client
        .get(format!("{base}/api/notes/{}", note.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stored, note);
}

#[tokio::test]
async fn test_request_id_header_is_set() {
    let base = spawn_memory_server().await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let base = spawn_memory_server().await;
    let doc: Value = reqwest::get(format!("{base}/openapi.json"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(doc["info"]["title"], "FlowNote API");
    assert!(doc["paths"]["/api/notes"].is_object());
}
