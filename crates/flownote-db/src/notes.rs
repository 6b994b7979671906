//! PostgreSQL note repository.

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use tracing::{debug, info};

use flownote_core::{
    new_note_id, Error, Note, NoteCategory, NoteDraft, NotePatch, NoteRepository, Result,
};

use crate::pool::log_pool_metrics;

/// Columns selected for every note read, in `map_row_to_note` order.
const NOTE_COLUMNS: &str =
    "id, title, content, category, tags, is_pinned, color, created_at, updated_at";

/// PostgreSQL implementation of NoteRepository.
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Map a database row to a Note.
fn map_row_to_note(row: PgRow) -> Result<Note> {
    let category: String = row.try_get("category")?;
    let category = category
        .parse::<NoteCategory>()
        .map_err(Error::Serialization)?;

    Ok(Note {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        category,
        tags: row.try_get("tags")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        is_pinned: row.try_get("is_pinned")?,
        color: row.try_get("color")?,
    })
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn insert(&self, draft: NoteDraft) -> Result<Note> {
        let id = new_note_id();
        let now = Utc::now();

        let query = format!(
            "INSERT INTO note (id, title, content, category, tags, is_pinned, color, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             RETURNING {}",
            NOTE_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(&id)
            .bind(&draft.title)
            .bind(&draft.content)
            .bind(draft.category.as_str())
            .bind(&draft.tags)
            .bind(draft.is_pinned)
            .bind(&draft.color)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        info!(
            subsystem = "db",
            component = "notes",
            op = "insert",
            note_id = %id,
            "Note inserted"
        );
        map_row_to_note(row)
    }

    async fn list(&self) -> Result<Vec<Note>> {
        let start = Instant::now();
        let query = format!(
            "SELECT {} FROM note ORDER BY created_at DESC, id DESC",
            NOTE_COLUMNS
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        let notes = rows
            .into_iter()
            .map(map_row_to_note)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            subsystem = "db",
            component = "notes",
            op = "list",
            result_count = notes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Notes listed"
        );
        log_pool_metrics(&self.pool);
        Ok(notes)
    }

    async fn fetch(&self, id: &str) -> Result<Note> {
        let query = format!("SELECT {} FROM note WHERE id = $1", NOTE_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or_else(|| Error::NoteNotFound(id.to_string()))?;

        map_row_to_note(row)
    }

    async fn update(&self, id: &str, patch: NotePatch) -> Result<Note> {
        let now = Utc::now();
        // $8 says whether color was present in the patch; $9 is the new value (may be NULL).
        let (color_present, color) = match patch.color {
            Some(color) => (true, color),
            None => (false, None),
        };

        let query = format!(
            "UPDATE note SET
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                category = COALESCE($5, category),
                tags = COALESCE($6, tags),
                is_pinned = COALESCE($7, is_pinned),
                color = CASE WHEN $8 THEN $9 ELSE color END,
                updated_at = GREATEST($2, created_at)
             WHERE id = $1
             RETURNING {}",
            NOTE_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id)
            .bind(now)
            .bind(patch.title)
            .bind(patch.content)
            .bind(patch.category.map(|c| c.as_str()))
            .bind(patch.tags)
            .bind(patch.is_pinned)
            .bind(color_present)
            .bind(color)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or_else(|| Error::NoteNotFound(id.to_string()))?;

        info!(
            subsystem = "db",
            component = "notes",
            op = "update",
            note_id = %id,
            "Note updated"
        );
        map_row_to_note(row)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM note WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id.to_string()));
        }

        info!(
            subsystem = "db",
            component = "notes",
            op = "delete",
            note_id = %id,
            "Note deleted"
        );
        Ok(())
    }
}
