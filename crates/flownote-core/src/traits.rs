//! Core traits for FlowNote abstractions.
//!
//! The API depends only on [`NoteRepository`]; concrete storage lives in
//! `flownote-db`.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Note, NoteDraft, NotePatch};

// =============================================================================
// NOTE REPOSITORY TRAITS
// =============================================================================

/// Durable storage for notes.
///
/// Implementations assign ids and timestamps; callers never set them.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note, returning it as stored.
    async fn insert(&self, draft: NoteDraft) -> Result<Note>;

    /// All notes, most recently created first.
    async fn list(&self) -> Result<Vec<Note>>;

    /// Fetch a note by id. `Error::NoteNotFound` if absent.
    async fn fetch(&self, id: &str) -> Result<Note>;

    /// Merge `patch` into the note and refresh `updated_at`.
    /// `Error::NoteNotFound` if absent.
    async fn update(&self, id: &str, patch: NotePatch) -> Result<Note>;

    /// Permanently delete a note. `Error::NoteNotFound` if absent.
    async fn delete(&self, id: &str) -> Result<()>;
}
