use crate::models::{Note, NoteDraft, NotePatch, UserId};
use crate::storage::RemoteStore;
use crate::{Error, Result};

/// In-memory note list for the signed-in user.
///
/// Each operation issues exactly one remote round trip and applies the
/// local mutation only after it succeeds; a store failure leaves the
/// list at its last-known-good state and surfaces the error. There is
/// no retry and no optimistic update.
#[derive(Debug, Default)]
pub struct NoteCollection {
    notes: Vec<Note>,
}

impl NoteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the local list with the user's notes, newest first
    /// (store-side order; display order is the pipeline's business).
    pub fn load(&mut self, store: &dyn RemoteStore, user: &UserId) -> Result<()> {
        self.notes = store.fetch_notes(user)?;
        Ok(())
    }

    /// Persist a draft as a new note and prepend it to the local list,
    /// so the newest note appears at the top regardless of timestamps.
    pub fn create(&mut self, store: &dyn RemoteStore, user: &UserId, draft: &NoteDraft) -> Result<Note> {
        draft.validate()?;

        let note = store.insert_note(user, draft)?;
        self.notes.insert(0, note.clone());
        Ok(note)
    }

    /// Apply a patch to a note, replacing the local entry in place so
    /// its position is unchanged. The id is checked against the local
    /// list first; the store remains the source of truth for the row.
    pub fn update(&mut self, store: &dyn RemoteStore, id: &str, patch: &NotePatch) -> Result<Note> {
        let pos = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| Error::NotFound(format!("Note not found: {}", id)))?;

        let note = store.update_note(id, patch)?;
        self.notes[pos] = note.clone();
        Ok(note)
    }

    /// Delete a note remotely, then locally. Deleting an id that is
    /// already absent is logged and ignored.
    pub fn delete(&mut self, store: &dyn RemoteStore, id: &str) -> Result<()> {
        if !self.contains(id) {
            tracing::debug!(note_id = id, "delete for unknown note id, ignoring");
            return Ok(());
        }

        store.delete_note(id)?;
        self.notes.retain(|n| n.id != id);
        Ok(())
    }

    /// Flip the pinned flag; a convenience wrapper over [`Self::update`].
    pub fn toggle_pin(&mut self, store: &dyn RemoteStore, id: &str) -> Result<Note> {
        let pinned = self
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("Note not found: {}", id)))?
            .pinned;

        self.update(store, id, &NotePatch::pin(!pinned))
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.notes.iter().any(|n| n.id == id)
    }

    pub fn all(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }
}
