//! The session's note collection.

use tracing::{debug, info};

use flownote_core::{filter_notes, Error, Note, NoteDraft, NoteFilters, NotePatch, Result};

use crate::backend::NoteBackend;

/// Single point of truth for notes during a session.
///
/// Mutations go through the backend first; the in-memory collection is only
/// replaced once the backend has accepted the change. A failed mutation
/// leaves the collection exactly as it was.
pub struct NoteStore {
    backend: Box<dyn NoteBackend>,
    notes: Vec<Note>,
}

impl NoteStore {
    /// Load the initial collection from `backend`.
    pub async fn open(backend: Box<dyn NoteBackend>) -> Result<Self> {
        let notes = backend.load().await?;
        info!(subsystem = "client", component = "store", backend = backend.name(), result_count = notes.len(), "Notes loaded");
        Ok(Self { backend, notes })
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Every note, most recently created first.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &str) -> Result<&Note> {
        self.notes
            .iter()
            .find(|n| n.id == id)
            .ok_or_else(|| Error::NoteNotFound(id.to_string()))
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| Error::NoteNotFound(id.to_string()))
    }

    /// Swap in `next` after the backend has persisted it.
    async fn commit(&mut self, next: Vec<Note>) -> Result<()> {
        self.backend.commit(&next).await?;
        self.notes = next;
        Ok(())
    }

    pub async fn create(&mut self, draft: NoteDraft) -> Result<Note> {
        let note = self.backend.create(draft).await?;

        let mut next = self.notes.clone();
        next.insert(0, note.clone());
        self.commit(next).await?;

        debug!(subsystem = "client", component = "store", op = "create", note_id = %note.id, "Note created");
        Ok(note)
    }

    pub async fn update(&mut self, id: &str, patch: NotePatch) -> Result<Note> {
        let index = self.position(id)?;
        let updated = self.backend.update(&self.notes[index], patch).await?;

        let mut next = self.notes.clone();
        next[index] = updated.clone();
        self.commit(next).await?;

        debug!(subsystem = "client", component = "store", op = "update", note_id = %id, "Note updated");
        Ok(updated)
    }

    pub async fn delete(&mut self, id: &str) -> Result<()> {
        let index = self.position(id)?;
        self.backend.delete(id).await?;

        let mut next = self.notes.clone();
        next.remove(index);
        self.commit(next).await?;

        debug!(subsystem = "client", component = "store", op = "delete", note_id = %id, "Note deleted");
        Ok(())
    }

    /// Flip the pin flag.
    pub async fn toggle_pin(&mut self, id: &str) -> Result<Note> {
        let pinned = self.get(id)?.is_pinned;
        self.update(id, NotePatch::pin(!pinned)).await
    }

    pub fn filter(&self, filters: &NoteFilters) -> Vec<&Note> {
        filter_notes(&self.notes, filters)
    }
}
