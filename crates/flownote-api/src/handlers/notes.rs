//! Note CRUD handlers.
//!
//! - `POST   /api/notes`      create
//! - `GET    /api/notes`      list, newest first
//! - `GET    /api/notes/:id`  fetch one
//! - `PUT    /api/notes/:id`  partial update
//! - `DELETE /api/notes/:id`  remove
//!
//! Only fetch distinguishes a missing note (404). Update and delete of a
//! missing id surface as 500 like any other storage failure, and so does a
//! body the JSON extractor rejects on create or update.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use tracing::{error, info};

use flownote_core::{defaults, Note, NoteDraft, NotePatch};

use crate::{ApiError, AppState, MessageBody};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(defaults::NOTES_PATH, get(list_notes).post(create_note))
        .route(
            &format!("{}/:id", defaults::NOTES_PATH),
            get(get_note).put(update_note).delete(delete_note),
        )
}

/// Create a note.
///
/// POST /api/notes
#[utoipa::path(post, path = "/api/notes", tag = "Notes",
    request_body = NoteDraft,
    responses(
        (status = 200, description = "Created", body = Note),
        (status = 500, description = "Invalid body or storage failure", body = crate::ErrorBody)
    ))]
pub async fn create_note(
    State(state): State<AppState>,
    payload: Result<Json<NoteDraft>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let Json(draft) = payload.map_err(|rejection| {
        error!(subsystem = "api", op = "create_note", error = %rejection, "Rejected note body");
        ApiError::internal_with_details("Failed to create note", rejection.body_text())
    })?;

    let note = state.notes.insert(draft).await.map_err(|e| {
        error!(subsystem = "api", op = "create_note", error = %e, "Failed to create note");
        ApiError::internal_with_details("Failed to create note", e.to_string())
    })?;

    info!(subsystem = "api", op = "create_note", note_id = %note.id, category = %note.category, "Note created");
    Ok(Json(note))
}

/// List every note, newest first.
///
/// GET /api/notes
#[utoipa::path(get, path = "/api/notes", tag = "Notes",
    responses(
        (status = 200, description = "All notes", body = Vec<Note>),
        (status = 500, description = "Storage failure", body = crate::ErrorBody)
    ))]
pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.notes.list().await.map_err(|e| {
        error!(subsystem = "api", op = "list_notes", error = %e, "Failed to fetch notes");
        ApiError::internal("Failed to fetch notes")
    })?;
    Ok(Json(notes))
}

/// Fetch one note.
///
/// GET /api/notes/:id
#[utoipa::path(get, path = "/api/notes/{id}", tag = "Notes",
    params(("id" = String, Path, description = "Note id")),
    responses(
        (status = 200, description = "The note", body = Note),
        (status = 404, description = "No note with this id", body = crate::ErrorBody),
        (status = 500, description = "Storage failure", body = crate::ErrorBody)
    ))]
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    match state.notes.fetch(&id).await {
        Ok(note) => Ok(Json(note)),
        Err(e) if e.is_not_found() => Err(ApiError::NotFound("Note not found")),
        Err(e) => {
            error!(subsystem = "api", op = "get_note", note_id = %id, error = %e, "Failed to fetch note");
            Err(ApiError::internal("Failed to fetch note"))
        }
    }
}

/// Merge the supplied fields into a note and refresh `updatedAt`.
///
/// PUT /api/notes/:id
#[utoipa::path(put, path = "/api/notes/{id}", tag = "Notes",
    params(("id" = String, Path, description = "Note id")),
    request_body = NotePatch,
    responses(
        (status = 200, description = "The updated note", body = Note),
        (status = 500, description = "Missing note, invalid body or storage failure", body = crate::ErrorBody)
    ))]
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NotePatch>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let Json(patch) = payload.map_err(|rejection| {
        error!(subsystem = "api", op = "update_note", note_id = %id, error = %rejection, "Rejected note body");
        ApiError::internal("Failed to update note")
    })?;

    let note = state.notes.update(&id, patch).await.map_err(|e| {
        error!(subsystem = "api", op = "update_note", note_id = %id, error = %e, "Failed to update note");
        ApiError::internal("Failed to update note")
    })?;

    info!(subsystem = "api", op = "update_note", note_id = %note.id, "Note updated");
    Ok(Json(note))
}

/// Delete a note.
///
/// DELETE /api/notes/:id
#[utoipa::path(delete, path = "/api/notes/{id}", tag = "Notes",
    params(("id" = String, Path, description = "Note id")),
    responses(
        (status = 200, description = "Deleted", body = MessageBody),
        (status = 500, description = "Missing note or storage failure", body = crate::ErrorBody)
    ))]
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    state.notes.delete(&id).await.map_err(|e| {
        error!(subsystem = "api", op = "delete_note", note_id = %id, error = %e, "Failed to delete note");
        ApiError::internal("Failed to delete note")
    })?;

    info!(subsystem = "api", op = "delete_note", note_id = %id, "Note deleted");
    Ok(Json(MessageBody {
        message: "Note deleted successfully".to_string(),
    }))
}
