//! Local persisted storage backend.
//!
//! Notes live in a small file-backed key/value store: one file per key in a
//! data directory. The whole collection is a single JSON array under
//! [`defaults::LOCAL_STORAGE_KEY`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use flownote_core::{defaults, new_note_id, Error, Note, NoteDraft, NotePatch, Result};

use crate::backend::NoteBackend;
use crate::seed::seed_notes;

/// String values stored as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Value under `key`, or `None` when the key was never written.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Persistence(format!("Failed to read {key}: {e}"))),
        }
    }

    /// Replace the value under `key`.
    ///
    /// Written to a sibling temp file and renamed into place so a crash never
    /// leaves a half-written value.
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| Error::Persistence(format!("Failed to create {}: {e}", self.dir.display())))?;

        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| Error::Persistence(format!("Failed to write {key}: {e}")))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| Error::Persistence(format!("Failed to write {key}: {e}")))?;
        Ok(())
    }
}

/// Backend that keeps the collection in local storage.
///
/// Ids and timestamps are assigned here rather than by a server.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    storage: FileKeyValueStore,
    key: String,
}

impl LocalBackend {
    pub fn new(storage: FileKeyValueStore) -> Self {
        Self::with_key(storage, defaults::LOCAL_STORAGE_KEY)
    }

    pub fn with_key(storage: FileKeyValueStore, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Backend over `dir`, using the standard key.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(FileKeyValueStore::new(dir))
    }

    async fn write_all(&self, notes: &[Note]) -> Result<()> {
        let raw = serde_json::to_string(notes)?;
        self.storage.set(&self.key, &raw).await?;
        debug!(subsystem = "client", component = "local", op = "commit", result_count = notes.len(), "Notes written");
        Ok(())
    }
}

#[async_trait]
impl NoteBackend for LocalBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn load(&self) -> Result<Vec<Note>> {
        match self.storage.get(&self.key).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                Error::Persistence(format!("Stored notes under {} are corrupt: {e}", self.key))
            }),
            None => {
                let notes = seed_notes(Utc::now());
                self.write_all(&notes).await?;
                info!(subsystem = "client", component = "local", result_count = notes.len(), "Seeded example notes");
                Ok(notes)
            }
        }
    }

    async fn create(&self, draft: NoteDraft) -> Result<Note> {
        Ok(Note::from_draft(new_note_id(), draft, Utc::now()))
    }

    async fn update(&self, current: &Note, patch: NotePatch) -> Result<Note> {
        let mut note = current.clone();
        note.apply(patch, Utc::now());
        Ok(note)
    }

    async fn delete(&self, _id: &str) -> Result<()> {
        Ok(())
    }

    async fn commit(&self, notes: &[Note]) -> Result<()> {
        self.write_all(notes).await
    }
}
