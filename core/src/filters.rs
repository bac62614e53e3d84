//! Pure filter/sort pipeline turning the note list into a display list.

use std::str::FromStr;

use crate::models::{CategoryId, Note};
use crate::{Error, Result};

/// Display ordering for the note list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// Descending by creation time.
    #[default]
    Newest,
    /// Ascending by creation time.
    Oldest,
    /// Pinned notes first; newest first within each partition.
    Pinned,
}

impl FromStr for SortOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "newest" => Ok(SortOption::Newest),
            "oldest" => Ok(SortOption::Oldest),
            "pinned" => Ok(SortOption::Pinned),
            other => Err(Error::Validation(format!("unknown sort option: {}", other))),
        }
    }
}

/// Filter and order notes for display.
///
/// A note passes when it belongs to the active category (or no category
/// filter is set) and matches the search text case-insensitively in
/// title or content. The input is never mutated; all sorts are stable,
/// so notes with equal timestamps keep their relative input order.
pub fn present(
    notes: &[Note],
    active_category: Option<CategoryId>,
    search: &str,
    sort: SortOption,
) -> Vec<Note> {
    let needle = search.to_lowercase();

    let mut visible: Vec<Note> = notes
        .iter()
        .filter(|note| {
            let in_category = match active_category {
                Some(id) => note.category_id == Some(id),
                None => true,
            };
            let matches_search = needle.is_empty()
                || note.title.to_lowercase().contains(&needle)
                || note.content.to_lowercase().contains(&needle);
            in_category && matches_search
        })
        .cloned()
        .collect();

    match sort {
        SortOption::Newest => visible.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOption::Oldest => visible.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOption::Pinned => visible.sort_by(|a, b| {
            b.pinned
                .cmp(&a.pinned)
                .then_with(|| b.created_at.cmp(&a.created_at))
        }),
    }

    visible
}
