use crate::categories::CategoryStore;
use crate::editor::EditorSession;
use crate::filters::{present, SortOption};
use crate::models::{Category, CategoryId, Note, UserId};
use crate::notes::NoteCollection;
use crate::storage::RemoteStore;
use crate::{Error, Result};

/// Per-user dashboard state: the signed-in user, both in-memory
/// stores, the current view settings and the editor session.
///
/// This is the explicit context object replacing ambient session
/// globals; it is built at application start and torn down (cleared)
/// at sign-out.
#[derive(Debug, Default)]
pub struct Dashboard {
    user: Option<UserId>,
    pub categories: CategoryStore,
    pub notes: NoteCollection,
    active_category: Option<CategoryId>,
    search: String,
    sort: SortOption,
    pub editor: EditorSession,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    pub fn active_category(&self) -> Option<CategoryId> {
        self.active_category
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    /// React to the auth collaborator reporting a session change.
    ///
    /// A user becoming available loads categories and notes; both
    /// fetches are attempted independently, so a failure in one leaves
    /// the other's result in place (the first error is returned). The
    /// user becoming unavailable tears all state down.
    pub fn session_changed(&mut self, store: &dyn RemoteStore, user: Option<UserId>) -> Result<()> {
        match user {
            Some(user) => {
                self.user = Some(user.clone());
                let categories = self.categories.load(store, &user);
                let notes = self.notes.load(store, &user);
                categories.and(notes)
            }
            None => {
                self.clear();
                Ok(())
            }
        }
    }

    fn clear(&mut self) {
        self.user = None;
        self.categories.clear();
        self.notes.clear();
        self.active_category = None;
        self.search.clear();
        self.sort = SortOption::default();
        self.editor.cancel();
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
    }

    /// Select the category filter; `None` shows all notes. The id must
    /// refer to a loaded category.
    pub fn set_active_category(&mut self, category: Option<CategoryId>) -> Result<()> {
        if let Some(id) = category {
            if self.categories.get(id).is_none() {
                return Err(Error::NotFound(format!("Category not found: {}", id)));
            }
        }
        self.active_category = category;
        Ok(())
    }

    /// The display list: category filter, search and sort applied.
    pub fn visible_notes(&self) -> Vec<Note> {
        present(self.notes.all(), self.active_category, &self.search, self.sort)
    }

    /// Create a category for the signed-in user.
    pub fn add_category(
        &mut self,
        store: &dyn RemoteStore,
        name: &str,
        color: Option<&str>,
    ) -> Result<Category> {
        let user = self.require_user()?;
        self.categories.add(store, &user, name, color)
    }

    /// Delete a category; when it was the active filter, the filter
    /// resets to "all notes". Dependent notes keep their (now
    /// dangling) category reference.
    pub fn remove_category(&mut self, store: &dyn RemoteStore, id: CategoryId) -> Result<()> {
        self.categories.remove(store, id)?;
        if self.active_category == Some(id) {
            tracing::debug!(category_id = id, "active filter category removed, showing all");
            self.active_category = None;
        }
        Ok(())
    }

    /// Open the editor on a new note under the active filter category.
    pub fn open_editor(&mut self) {
        self.editor.open_new(self.active_category);
    }

    /// Open the editor on an existing note.
    pub fn edit_note(&mut self, id: &str) -> Result<()> {
        let note = self
            .notes
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("Note not found: {}", id)))?;
        self.editor.open_existing(note);
        Ok(())
    }

    /// Save the open editor draft through the note collection.
    pub fn save_editor(&mut self, store: &dyn RemoteStore) -> Result<Note> {
        let user = self.require_user()?;
        self.editor.save(&mut self.notes, store, &user)
    }

    fn require_user(&self) -> Result<UserId> {
        self.user
            .clone()
            .ok_or_else(|| Error::Store("no signed-in user".to_string()))
    }
}
