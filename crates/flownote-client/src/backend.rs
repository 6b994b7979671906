//! Backing strategy for the note store.

use async_trait::async_trait;

use flownote_core::{Note, NoteDraft, NotePatch, Result};

/// Where a [`crate::NoteStore`] reads and writes notes.
///
/// Each mutation returns the note as the backend sees it; the store adopts
/// that value as truth. After every successful mutation the store hands the
/// whole new collection to [`NoteBackend::commit`] before replacing its own
/// copy, so a failed commit leaves the session untouched.
#[async_trait]
pub trait NoteBackend: Send + Sync {
    /// Short name for logs and CLI output.
    fn name(&self) -> &'static str;

    /// Initial collection, newest first.
    async fn load(&self) -> Result<Vec<Note>>;

    /// Persist a new note and return it with id and timestamps assigned.
    async fn create(&self, draft: NoteDraft) -> Result<Note>;

    /// Apply `patch` to `current` and return the updated note.
    async fn update(&self, current: &Note, patch: NotePatch) -> Result<Note>;

    /// Remove the note with `id`.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Write back the full collection after a mutation.
    async fn commit(&self, _notes: &[Note]) -> Result<()> {
        Ok(())
    }
}
