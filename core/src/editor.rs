use crate::models::{CategoryId, Note, NoteDraft, UserId};
use crate::notes::NoteCollection;
use crate::storage::RemoteStore;
use crate::{Error, Result};

/// Editor session: either closed, or holding the draft being composed.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    #[default]
    Closed,
    Editing(NoteDraft),
}

/// Two-state machine around the note editor.
///
/// A draft exists only while the session is `Editing`; closing — by
/// save or cancel — discards it, and reopening always starts from a
/// fresh copy of its source.
#[derive(Debug, Default)]
pub struct EditorSession {
    state: EditorState,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, EditorState::Editing(_))
    }

    pub fn draft(&self) -> Option<&NoteDraft> {
        match &self.state {
            EditorState::Editing(draft) => Some(draft),
            EditorState::Closed => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut NoteDraft> {
        match &mut self.state {
            EditorState::Editing(draft) => Some(draft),
            EditorState::Closed => None,
        }
    }

    /// Open on an empty draft for a new note, pre-assigned to the
    /// active filter's category when one is selected.
    pub fn open_new(&mut self, active_category: Option<CategoryId>) {
        self.state = EditorState::Editing(NoteDraft::blank(active_category));
    }

    /// Open on a draft copied from an existing note.
    pub fn open_existing(&mut self, note: &Note) {
        self.state = EditorState::Editing(NoteDraft::from_note(note));
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if let Some(draft) = self.draft_mut() {
            draft.title = title.into();
        }
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        if let Some(draft) = self.draft_mut() {
            draft.content = content.into();
        }
    }

    pub fn set_category(&mut self, category_id: Option<CategoryId>) {
        if let Some(draft) = self.draft_mut() {
            draft.category_id = category_id;
        }
    }

    /// Persist the draft through the note collection.
    ///
    /// A validation failure (empty title, markup without text) keeps
    /// the session `Editing` so the user can correct the draft. Once
    /// the draft validates the session closes and the store call runs;
    /// a store failure at that point surfaces with the editor already
    /// closed, mirroring the source UI which dismisses the editor
    /// before the write settles.
    pub fn save(
        &mut self,
        notes: &mut NoteCollection,
        store: &dyn RemoteStore,
        user: &UserId,
    ) -> Result<Note> {
        match std::mem::take(&mut self.state) {
            EditorState::Closed => Err(Error::Validation("no note is being edited".to_string())),
            EditorState::Editing(draft) => {
                if let Err(err) = draft.validate() {
                    self.state = EditorState::Editing(draft);
                    return Err(err);
                }

                match &draft.source_note_id {
                    Some(id) => notes.update(store, id, &crate::models::NotePatch::from_draft(&draft)),
                    None => notes.create(store, user, &draft),
                }
            }
        }
    }

    /// Discard the draft unconditionally.
    pub fn cancel(&mut self) {
        self.state = EditorState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStore;

    fn setup() -> (tempfile::TempDir, SqliteStore, UserId, NoteCollection) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(dir.path().join("test.db")).unwrap();
        (dir, store, UserId::new("alice"), NoteCollection::new())
    }

    #[test]
    fn test_open_new_adopts_active_category() {
        let mut editor = EditorSession::new();
        editor.open_new(Some(3));

        let draft = editor.draft().unwrap();
        assert!(draft.is_new());
        assert_eq!(draft.category_id, Some(3));
    }

    #[test]
    fn test_open_existing_copies_note() {
        let mut editor = EditorSession::new();
        let note = Note::with_id("n-1", "Title", "<p>body</p>");
        editor.open_existing(&note);

        let draft = editor.draft().unwrap();
        assert_eq!(draft.source_note_id.as_deref(), Some("n-1"));
        assert_eq!(draft.title, "Title");
    }

    #[test]
    fn test_edits_are_noops_when_closed() {
        let mut editor = EditorSession::new();
        editor.set_title("ghost");
        assert!(!editor.is_open());
        assert!(editor.draft().is_none());
    }

    #[test]
    fn test_save_with_empty_content_stays_open() {
        let (_dir, store, user, mut notes) = setup();
        let mut editor = EditorSession::new();

        editor.open_new(None);
        editor.set_title("Title");
        editor.set_content("<p></p>");

        let result = editor.save(&mut notes, &store, &user);
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(editor.is_open());
        assert_eq!(editor.draft().unwrap().title, "Title");
        assert!(notes.is_empty());
    }

    #[test]
    fn test_save_new_note_creates_and_closes() {
        let (_dir, store, user, mut notes) = setup();
        let mut editor = EditorSession::new();

        editor.open_new(Some(1));
        editor.set_title("Groceries");
        editor.set_content("<p>milk</p>");

        let note = editor.save(&mut notes, &store, &user).unwrap();
        assert!(!editor.is_open());
        assert_eq!(note.category_id, Some(1));
        assert_eq!(notes.all()[0].id, note.id);
    }

    #[test]
    fn test_save_existing_note_updates() {
        let (_dir, store, user, mut notes) = setup();
        let mut editor = EditorSession::new();

        editor.open_new(None);
        editor.set_title("Draft");
        editor.set_content("<p>v1</p>");
        let created = editor.save(&mut notes, &store, &user).unwrap();

        editor.open_existing(notes.get(&created.id).unwrap());
        editor.set_content("<p>v2</p>");
        let updated = editor.save(&mut notes, &store, &user).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes.get(&created.id).unwrap().content, "<p>v2</p>");
    }

    #[test]
    fn test_cancel_discards_draft() {
        let (_dir, store, user, mut notes) = setup();
        let mut editor = EditorSession::new();

        editor.open_new(None);
        editor.set_title("Will not survive");
        editor.cancel();

        assert!(!editor.is_open());
        assert!(matches!(
            editor.save(&mut notes, &store, &user),
            Err(Error::Validation(_))
        ));
        assert!(notes.is_empty());
    }

    #[test]
    fn test_reopen_starts_fresh() {
        let mut editor = EditorSession::new();

        editor.open_new(None);
        editor.set_title("typed then abandoned");
        editor.cancel();

        editor.open_new(None);
        assert!(editor.draft().unwrap().title.is_empty());
    }
}
