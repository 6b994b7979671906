//! Save rules for the note editor.
//!
//! The editor collects raw form input (a comma-separated tag string, an
//! untrimmed title) and turns it into a [`NoteDraft`] at save time. A note
//! with neither title nor content is rejected here, before any backend call.

use crate::defaults::{TAG_SEPARATOR, UNTITLED_NOTE_TITLE};
use crate::error::{Error, Result};
use crate::models::{Note, NoteCategory, NoteDraft};

/// Raw editor form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorInput {
    pub title: String,
    pub content: String,
    pub category: NoteCategory,
    pub tags_input: String,
    pub is_pinned: bool,
}

impl Default for EditorInput {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            category: NoteCategory::Personal,
            tags_input: String::new(),
            is_pinned: false,
        }
    }
}

impl EditorInput {
    /// Form pre-filled from an existing note.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            category: note.category,
            tags_input: join_tags(&note.tags),
            is_pinned: note.is_pinned,
        }
    }

    /// Validate and normalize into a draft.
    ///
    /// Fails with [`Error::Validation`] when title and content are both blank.
    pub fn to_draft(&self) -> Result<NoteDraft> {
        let title = self.title.trim();
        let content = self.content.trim();
        if title.is_empty() && content.is_empty() {
            return Err(Error::Validation(
                "Cannot save empty note: add a title or content".to_string(),
            ));
        }

        Ok(NoteDraft {
            title: if title.is_empty() {
                UNTITLED_NOTE_TITLE.to_string()
            } else {
                title.to_string()
            },
            content: content.to_string(),
            category: self.category,
            tags: parse_tags(&self.tags_input),
            is_pinned: self.is_pinned,
            color: None,
        })
    }

    /// Whether saving would change anything.
    ///
    /// For a new note (`original` is `None`) any non-blank title or content
    /// counts as a change.
    pub fn has_changes(&self, original: Option<&Note>) -> bool {
        match original {
            None => !self.title.trim().is_empty() || !self.content.trim().is_empty(),
            Some(note) => {
                self.title != note.title
                    || self.content != note.content
                    || self.category != note.category
                    || parse_tags(&self.tags_input) != note.tags
                    || self.is_pinned != note.is_pinned
            }
        }
    }
}

/// Split a comma-separated tag string, trimming and dropping empty entries.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Inverse of [`parse_tags`] for display.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}
