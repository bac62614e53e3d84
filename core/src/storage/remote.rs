//! Contract with the remote store collaborator.
//!
//! The managed backend owns persistence, row identity and timestamps;
//! this module only fixes the surface the state model consumes. Each
//! method is a single request/response round trip: the caller blocks
//! until the store answers and applies its local mutation afterwards.
//! There is no retry and no cancellation; two in-flight mutations of
//! the same row resolve last-write-wins at the store.

use crate::models::{Category, CategoryId, Note, NoteDraft, NotePatch, UserId};
use crate::Result;

/// CRUD surface of the remote `notes` and `categories` collections,
/// scoped by the owning user.
///
/// Implementations convert rows to typed models at this boundary;
/// untyped row data never crosses it. Any transport or backend failure
/// maps to [`crate::Error::Store`].
pub trait RemoteStore {
    /// All categories owned by the user.
    fn fetch_categories(&self, user: &UserId) -> Result<Vec<Category>>;

    /// Insert a category and return it with its store-assigned id.
    fn insert_category(&self, user: &UserId, name: &str, color: Option<&str>) -> Result<Category>;

    /// Rename a category and return the updated row.
    fn rename_category(&self, id: CategoryId, name: &str) -> Result<Category>;

    /// Delete a category. Deleting an absent id is a no-op; dependent
    /// notes are left untouched (no cascade).
    fn delete_category(&self, id: CategoryId) -> Result<()>;

    /// All notes owned by the user, newest first.
    fn fetch_notes(&self, user: &UserId) -> Result<Vec<Note>>;

    /// Insert a note from a draft and return it with store-assigned id
    /// and creation timestamp.
    fn insert_note(&self, user: &UserId, draft: &NoteDraft) -> Result<Note>;

    /// Apply a partial update and return the updated row.
    fn update_note(&self, id: &str, patch: &NotePatch) -> Result<Note>;

    /// Delete a note. Deleting an absent id is a no-op.
    fn delete_note(&self, id: &str) -> Result<()>;
}

/// The auth side of the collaborator contract: who is signed in right
/// now. Watching for session changes stays with the collaborator; the
/// core only reacts when told (see `session::Dashboard::session_changed`).
pub trait AuthProvider {
    fn current_user(&self) -> Option<UserId>;
}

/// Auth provider backed by nothing but a held user id. Stands in for a
/// real session when running against a local store (CLI, tests).
#[derive(Debug, Clone, Default)]
pub struct LocalAuth {
    user: Option<UserId>,
}

impl LocalAuth {
    pub fn signed_in(user: UserId) -> Self {
        Self { user: Some(user) }
    }

    pub fn signed_out() -> Self {
        Self { user: None }
    }

    pub fn sign_in(&mut self, user: UserId) {
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }
}

impl AuthProvider for LocalAuth {
    fn current_user(&self) -> Option<UserId> {
        self.user.clone()
    }
}
