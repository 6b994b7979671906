//! In-memory note repository.
//!
//! Volatile storage with the same contract as [`crate::PgNoteRepository`].
//! Used by the server when `FLOWNOTE_STORAGE=memory` and by API tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use flownote_core::{new_note_id, Error, Note, NoteDraft, NotePatch, NoteRepository, Result};

/// Notes kept newest-first in a `Vec` behind an async lock.
#[derive(Default)]
pub struct InMemoryNoteRepository {
    notes: RwLock<Vec<Note>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `notes`, re-sorted newest first.
    pub fn with_notes(mut notes: Vec<Note>) -> Self {
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self {
            notes: RwLock::new(notes),
        }
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn insert(&self, draft: NoteDraft) -> Result<Note> {
        let note = Note::from_draft(new_note_id(), draft, Utc::now());
        self.notes.write().await.insert(0, note.clone());
        debug!(subsystem = "db", component = "memory", op = "insert", note_id = %note.id, "Note inserted");
        Ok(note)
    }

    async fn list(&self) -> Result<Vec<Note>> {
        Ok(self.notes.read().await.clone())
    }

    async fn fetch(&self, id: &str) -> Result<Note> {
        self.notes
            .read()
            .await
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| Error::NoteNotFound(id.to_string()))
    }

    async fn update(&self, id: &str, patch: NotePatch) -> Result<Note> {
        let mut notes = self.notes.write().await;
        let note = notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Error::NoteNotFound(id.to_string()))?;
        note.apply(patch, Utc::now());
        Ok(note.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            return Err(Error::NoteNotFound(id.to_string()));
        }
        Ok(())
    }
}
