//! Note filtering and display ordering.
//!
//! Filtering is a pure projection over a collection: the output is a
//! subsequence of the input in the same order. Only one criterion is applied
//! per pass, chosen by precedence:
//!
//! | Precedence | Criterion | Match rule |
//! |------------|-----------|------------|
//! | 1 | `search` | case-insensitive substring of title, content, or any tag |
//! | 2 | `category` | exact category |
//! | 3 | `tags` | any requested tag is a case-insensitive substring of any note tag |
//!
//! An empty search string or an empty tag list counts as unset.
//!
//! Criteria never combine. With both `category` and `tags` set the result is
//! the whole category; the tag list is ignored rather than intersected.

use serde::{Deserialize, Serialize};

use crate::models::{Note, NoteCategory};

/// Filter criteria. All fields are independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<NoteCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// The single criterion a filter pass applies.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Criterion {
    All,
    Search(String),
    Category(NoteCategory),
    Tags(Vec<String>),
}

impl Criterion {
    fn matches(&self, note: &Note) -> bool {
        match self {
            Criterion::All => true,
            Criterion::Search(needle) => matches_search(note, needle),
            Criterion::Category(category) => note.category == *category,
            Criterion::Tags(wanted) => matches_tags(note, wanted),
        }
    }
}

impl NoteFilters {
    pub fn by_category(category: NoteCategory) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn by_search(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            ..Self::default()
        }
    }

    pub fn by_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: Some(tags.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Whether a category or search filter is set.
    ///
    /// Tags alone do not count: the filter bar only offers "Clear" for the
    /// search box and the category pills.
    pub fn is_active(&self) -> bool {
        self.category.is_some() || self.search.as_deref().is_some_and(|s| !s.is_empty())
    }

    fn criterion(&self) -> Criterion {
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            return Criterion::Search(search.to_lowercase());
        }
        if let Some(category) = self.category {
            return Criterion::Category(category);
        }
        match self.tags.as_deref() {
            Some(tags) if !tags.is_empty() => {
                Criterion::Tags(tags.iter().map(|t| t.to_lowercase()).collect())
            }
            _ => Criterion::All,
        }
    }

    /// Whether a single note passes this filter.
    pub fn matches(&self, note: &Note) -> bool {
        self.criterion().matches(note)
    }
}

fn matches_search(note: &Note, needle: &str) -> bool {
    note.title.to_lowercase().contains(needle)
        || note.content.to_lowercase().contains(needle)
        || note.tags.iter().any(|t| t.to_lowercase().contains(needle))
}

fn matches_tags(note: &Note, wanted: &[String]) -> bool {
    wanted.iter().any(|tag| {
        note.tags
            .iter()
            .any(|note_tag| note_tag.to_lowercase().contains(tag.as_str()))
    })
}

/// Apply `filters` to `notes`, preserving input order.
pub fn filter_notes<'a>(notes: &'a [Note], filters: &NoteFilters) -> Vec<&'a Note> {
    let criterion = filters.criterion();
    notes.iter().filter(|note| criterion.matches(note)).collect()
}

/// Display order: pinned notes first, each group keeping its relative order.
pub fn pinned_first<'a, I>(notes: I) -> Vec<&'a Note>
where
    I: IntoIterator<Item = &'a Note>,
{
    let (mut pinned, unpinned): (Vec<&Note>, Vec<&Note>) =
        notes.into_iter().partition(|n| n.is_pinned);
    pinned.extend(unpinned);
    pinned
}
