use serde::{Deserialize, Serialize};

use crate::content;
use crate::models::{CategoryId, Note};
use crate::{Error, Result};

/// Ephemeral buffer for a note being composed or edited.
///
/// Lives only while the editor session is open; converted into a create
/// or update request on save and discarded afterwards. `source_note_id`
/// is `None` for a brand-new note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoteDraft {
    pub source_note_id: Option<String>,
    pub title: String,
    pub content: String,
    pub pinned: bool,
    pub category_id: Option<CategoryId>,
}

impl NoteDraft {
    /// Empty draft for a new note, pre-assigned to the given category
    /// (the active filter's category when one is selected).
    pub fn blank(category_id: Option<CategoryId>) -> Self {
        Self {
            source_note_id: None,
            title: String::new(),
            content: String::new(),
            pinned: false,
            category_id,
        }
    }

    /// Draft copied from an existing note.
    pub fn from_note(note: &Note) -> Self {
        Self {
            source_note_id: Some(note.id.clone()),
            title: note.title.clone(),
            content: note.content.clone(),
            pinned: note.pinned,
            category_id: note.category_id,
        }
    }

    pub fn is_new(&self) -> bool {
        self.source_note_id.is_none()
    }

    /// Precondition for persisting: non-empty trimmed title and a body
    /// with actual text, not just markup like `<p></p>`.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("note title is empty".to_string()));
        }
        if !content::has_text(&self.content) {
            return Err(Error::Validation("note content is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_draft_adopts_category() {
        let draft = NoteDraft::blank(Some(2));
        assert!(draft.is_new());
        assert_eq!(draft.category_id, Some(2));
        assert!(draft.title.is_empty());
    }

    #[test]
    fn test_from_note_copies_fields() {
        let mut note = Note::with_id("n-1", "Title", "<p>body</p>");
        note.pinned = true;
        note.category_id = Some(4);

        let draft = NoteDraft::from_note(&note);
        assert_eq!(draft.source_note_id.as_deref(), Some("n-1"));
        assert_eq!(draft.title, "Title");
        assert_eq!(draft.content, "<p>body</p>");
        assert!(draft.pinned);
        assert_eq!(draft.category_id, Some(4));
        assert!(!draft.is_new());
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let mut draft = NoteDraft::blank(None);
        draft.title = "   ".to_string();
        draft.content = "<p>body</p>".to_string();
        assert!(matches!(draft.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_markup_without_text() {
        let mut draft = NoteDraft::blank(None);
        draft.title = "Title".to_string();
        draft.content = "<p></p>".to_string();
        assert!(matches!(draft.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_validate_accepts_real_content() {
        let mut draft = NoteDraft::blank(None);
        draft.title = "Title".to_string();
        draft.content = "<p>hello</p>".to_string();
        assert!(draft.validate().is_ok());
    }
}
