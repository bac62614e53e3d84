use crate::models::{Category, CategoryId, UserId};
use crate::storage::RemoteStore;
use crate::{Error, Result};

/// Most categories a single user may own.
pub const CATEGORY_LIMIT: usize = 5;

/// In-memory category list for the signed-in user.
///
/// Every mutation is write-through: the remote call happens first and
/// the local list changes only on success, so a store failure leaves
/// the list at its last-known-good state.
#[derive(Debug, Default)]
pub struct CategoryStore {
    categories: Vec<Category>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the local list with the user's categories from the
    /// store. On failure the previous list is kept.
    pub fn load(&mut self, store: &dyn RemoteStore, user: &UserId) -> Result<()> {
        self.categories = store.fetch_categories(user)?;
        Ok(())
    }

    /// Create a category and append it to the local list.
    ///
    /// The count limit is checked locally before any remote call; the
    /// sixth add fails with [`Error::LimitExceeded`] and nothing is
    /// sent to the store.
    pub fn add(
        &mut self,
        store: &dyn RemoteStore,
        user: &UserId,
        name: &str,
        color: Option<&str>,
    ) -> Result<Category> {
        if !Category::is_valid_name(name) {
            return Err(Error::Validation("category name is empty".to_string()));
        }
        if self.categories.len() >= CATEGORY_LIMIT {
            return Err(Error::LimitExceeded(CATEGORY_LIMIT));
        }

        let category = store.insert_category(user, name.trim(), color)?;
        self.categories.push(category.clone());
        Ok(category)
    }

    /// Rename a category, replacing the local entry in place so the
    /// list order is preserved.
    pub fn rename(&mut self, store: &dyn RemoteStore, id: CategoryId, new_name: &str) -> Result<Category> {
        if !Category::is_valid_name(new_name) {
            return Err(Error::Validation("category name is empty".to_string()));
        }
        let pos = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| Error::NotFound(format!("Category not found: {}", id)))?;

        let category = store.rename_category(id, new_name.trim())?;
        self.categories[pos] = category.clone();
        Ok(category)
    }

    /// Delete a category remotely, then drop it from the local list.
    /// Dependent notes are not touched (no cascade).
    pub fn remove(&mut self, store: &dyn RemoteStore, id: CategoryId) -> Result<()> {
        store.delete_category(id)?;
        self.categories.retain(|c| c.id != id);
        Ok(())
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn clear(&mut self) {
        self.categories.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Note, NoteDraft, NotePatch};
    use crate::storage::SqliteStore;

    fn setup() -> (tempfile::TempDir, SqliteStore, UserId) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(dir.path().join("test.db")).unwrap();
        (dir, store, UserId::new("alice"))
    }

    /// Store stub whose every call fails, for asserting that local
    /// state survives remote failures untouched.
    struct FailingStore;

    impl RemoteStore for FailingStore {
        fn fetch_categories(&self, _user: &UserId) -> Result<Vec<Category>> {
            Err(Error::Store("connection refused".to_string()))
        }
        fn insert_category(&self, _user: &UserId, _name: &str, _color: Option<&str>) -> Result<Category> {
            Err(Error::Store("connection refused".to_string()))
        }
        fn rename_category(&self, _id: CategoryId, _name: &str) -> Result<Category> {
            Err(Error::Store("connection refused".to_string()))
        }
        fn delete_category(&self, _id: CategoryId) -> Result<()> {
            Err(Error::Store("connection refused".to_string()))
        }
        fn fetch_notes(&self, _user: &UserId) -> Result<Vec<Note>> {
            Err(Error::Store("connection refused".to_string()))
        }
        fn insert_note(&self, _user: &UserId, _draft: &NoteDraft) -> Result<Note> {
            Err(Error::Store("connection refused".to_string()))
        }
        fn update_note(&self, _id: &str, _patch: &NotePatch) -> Result<Note> {
            Err(Error::Store("connection refused".to_string()))
        }
        fn delete_note(&self, _id: &str) -> Result<()> {
            Err(Error::Store("connection refused".to_string()))
        }
    }

    #[test]
    fn test_add_and_load() {
        let (_dir, store, user) = setup();
        let mut categories = CategoryStore::new();

        let work = categories.add(&store, &user, "Work", Some("#3b82f6")).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories.get(work.id).unwrap().name, "Work");

        let mut reloaded = CategoryStore::new();
        reloaded.load(&store, &user).unwrap();
        assert_eq!(reloaded.all(), categories.all());
    }

    #[test]
    fn test_sixth_add_hits_limit() {
        let (_dir, store, user) = setup();
        let mut categories = CategoryStore::new();

        for name in ["Work", "Home", "Ideas", "Travel", "Reading"] {
            categories.add(&store, &user, name, None).unwrap();
        }
        assert_eq!(categories.len(), 5);

        let result = categories.add(&store, &user, "Extra", None);
        assert!(matches!(result, Err(Error::LimitExceeded(5))));
        assert_eq!(categories.len(), 5);

        // The limit check happens before the remote call, so nothing
        // was inserted store-side either.
        assert_eq!(store.fetch_categories(&user).unwrap().len(), 5);
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let (_dir, store, user) = setup();
        let mut categories = CategoryStore::new();

        assert!(matches!(
            categories.add(&store, &user, "   ", None),
            Err(Error::Validation(_))
        ));
        assert!(categories.is_empty());
    }

    #[test]
    fn test_rename_preserves_order() {
        let (_dir, store, user) = setup();
        let mut categories = CategoryStore::new();

        let work = categories.add(&store, &user, "Work", None).unwrap();
        let home = categories.add(&store, &user, "Home", None).unwrap();

        categories.rename(&store, work.id, "Office").unwrap();

        let names: Vec<&str> = categories.all().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Office", "Home"]);
        assert_eq!(categories.all()[1].id, home.id);
    }

    #[test]
    fn test_rename_unknown_id() {
        let (_dir, store, user) = setup();
        let mut categories = CategoryStore::new();
        categories.add(&store, &user, "Work", None).unwrap();

        assert!(matches!(
            categories.rename(&store, 999, "Ghost"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_remove() {
        let (_dir, store, user) = setup();
        let mut categories = CategoryStore::new();

        let work = categories.add(&store, &user, "Work", None).unwrap();
        categories.add(&store, &user, "Home", None).unwrap();

        categories.remove(&store, work.id).unwrap();
        assert_eq!(categories.len(), 1);
        assert!(categories.get(work.id).is_none());
    }

    #[test]
    fn test_store_failure_leaves_list_unchanged() {
        let (_dir, store, user) = setup();
        let mut categories = CategoryStore::new();
        categories.add(&store, &user, "Work", None).unwrap();
        let before = categories.all().to_vec();

        let failing = FailingStore;
        assert!(categories.load(&failing, &user).is_err());
        assert!(categories.add(&failing, &user, "Home", None).is_err());
        assert!(categories.rename(&failing, before[0].id, "Office").is_err());
        assert!(categories.remove(&failing, before[0].id).is_err());

        assert_eq!(categories.all(), before.as_slice());
    }
}
