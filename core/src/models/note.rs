use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content;
use crate::models::{CategoryId, NoteDraft};

/// A persisted note as returned by the remote store.
///
/// The owning user is not part of the record; every store query is
/// already scoped by user id. `content` is rich-text markup as produced
/// by the editing collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub pinned: bool,
    pub category_id: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Build a note with a specific id (for testing or import)
    pub fn with_id(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            pinned: false,
            category_id: None,
            created_at: Utc::now(),
        }
    }

    /// Plain-text snippet of the body for list rendering.
    pub fn preview(&self, max_chars: usize) -> String {
        content::preview(&self.content, max_chars)
    }
}

/// Partial update applied to a persisted note.
///
/// `None` fields are left untouched. `category_id` is doubly optional:
/// the outer `None` means "keep", `Some(None)` clears the category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub pinned: Option<bool>,
    pub category_id: Option<Option<CategoryId>>,
}

impl NotePatch {
    /// Patch flipping only the pinned flag.
    pub fn pin(pinned: bool) -> Self {
        Self {
            pinned: Some(pinned),
            ..Self::default()
        }
    }

    /// Full editor-save patch: title, content, pinned and category all
    /// come from the draft, matching what the editor submits.
    pub fn from_draft(draft: &NoteDraft) -> Self {
        Self {
            title: Some(draft.title.clone()),
            content: Some(draft.content.clone()),
            pinned: Some(draft.pinned),
            category_id: Some(draft.category_id),
        }
    }

    /// Apply the patch to a note in place.
    pub fn apply(&self, note: &mut Note) {
        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(content) = &self.content {
            note.content = content.clone();
        }
        if let Some(pinned) = self.pinned {
            note.pinned = pinned;
        }
        if let Some(category_id) = self.category_id {
            note.category_id = category_id;
        }
    }
}
