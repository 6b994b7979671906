//! Core data models for FlowNote.
//!
//! The note is the only entity. Drafts and patches are the shapes accepted by
//! create and update; both are shared by the API, the repositories and the
//! client store so the JSON contract is defined in exactly one place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

// =============================================================================
// NOTE CATEGORY
// =============================================================================

/// Fixed set of note categories. There is no open extension.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum NoteCategory {
    Work,
    Personal,
    Ideas,
    Tasks,
}

impl NoteCategory {
    /// All categories in the order the filter bar shows them.
    pub const ALL: [NoteCategory; 4] = [
        NoteCategory::Work,
        NoteCategory::Personal,
        NoteCategory::Ideas,
        NoteCategory::Tasks,
    ];

    /// Wire and storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteCategory::Work => "work",
            NoteCategory::Personal => "personal",
            NoteCategory::Ideas => "ideas",
            NoteCategory::Tasks => "tasks",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            NoteCategory::Work => "Work",
            NoteCategory::Personal => "Personal",
            NoteCategory::Ideas => "Ideas",
            NoteCategory::Tasks => "Tasks",
        }
    }
}

impl std::fmt::Display for NoteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NoteCategory {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "work" => Ok(Self::Work),
            "personal" => Ok(Self::Personal),
            "ideas" => Ok(Self::Ideas),
            "tasks" => Ok(Self::Tasks),
            _ => Err(format!("Invalid note category: {}", s)),
        }
    }
}

// =============================================================================
// NOTE TYPES
// =============================================================================

/// Generate a new opaque note identifier.
///
/// UUIDv7 text, so identifiers sort by creation time.
pub fn new_note_id() -> String {
    Uuid::now_v7().to_string()
}

/// A persisted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: NoteCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_pinned: bool,
    /// Display color, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Note {
    /// Materialize a draft with an assigned id and both timestamps set to `now`.
    pub fn from_draft(id: String, draft: NoteDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
            category: draft.category,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
            is_pinned: draft.is_pinned,
            color: draft.color,
        }
    }

    /// Merge the fields present in `patch` and refresh `updated_at`.
    ///
    /// `updated_at` never moves before `created_at`, even if the clock does.
    pub fn apply(&mut self, patch: NotePatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(is_pinned) = patch.is_pinned {
            self.is_pinned = is_pinned;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        self.touch(now);
    }

    /// Refresh `updated_at`, clamped to `created_at`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }
}

/// A note before persistence: no id, no timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub category: NoteCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl NoteDraft {
    /// Empty draft in the given category.
    pub fn new(category: NoteCategory) -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            category,
            tags: Vec::new(),
            is_pinned: false,
            color: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn pinned(mut self, is_pinned: bool) -> Self {
        self.is_pinned = is_pinned;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Partial update. Absent fields are left untouched.
///
/// `color` is tri-state: absent (untouched), `null` (cleared), or a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<NoteCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub color: Option<Option<String>>,
}

impl NotePatch {
    /// Patch that only sets the pin flag.
    pub fn pin(is_pinned: bool) -> Self {
        Self {
            is_pinned: Some(is_pinned),
            ..Self::default()
        }
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.is_pinned.is_none()
            && self.color.is_none()
    }
}

impl From<NoteDraft> for NotePatch {
    /// Full overwrite of every editable field, as the editor's save does.
    fn from(draft: NoteDraft) -> Self {
        Self {
            title: Some(draft.title),
            content: Some(draft.content),
            category: Some(draft.category),
            tags: Some(draft.tags),
            is_pinned: Some(draft.is_pinned),
            color: draft.color.map(Some),
        }
    }
}

/// Distinguish a present `null` from an absent field.
fn deserialize_present<'de, T, D>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
