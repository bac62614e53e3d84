use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Row};

use crate::models::{
    datetime_to_timestamp, timestamp_to_datetime, Category, CategoryId, Note, NoteDraft,
    NotePatch, UserId,
};
use crate::storage::{Connection, Database, RemoteStore};
use crate::{Error, Result};

/// [`RemoteStore`] backed by a local SQLite file.
///
/// Plays the role of the managed backend: it assigns row identity and
/// creation timestamps, scopes every query by user id, and mirrors the
/// backend's wire behavior of treating deletes of absent rows as
/// no-ops. Timestamps are truncated to whole seconds so a returned
/// model compares equal to the same row fetched later.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Database::new(path).get_or_create()?;
        Ok(Self { conn })
    }

    fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
        Ok(Note {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            pinned: row.get(3)?,
            category_id: row.get(4)?,
            created_at: timestamp_to_datetime(row.get(5)?),
        })
    }

    fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
        Ok(Category {
            id: row.get(0)?,
            name: row.get(1)?,
            color: row.get(2)?,
            created_at: timestamp_to_datetime(row.get(3)?),
        })
    }

    fn get_note(&self, id: &str) -> Result<Note> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, content, pinned, category_id, created_at FROM notes WHERE id = ?1",
        )?;

        match stmt.query_row(params![id], Self::note_from_row) {
            Ok(note) => Ok(note),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(Error::NotFound(format!("Note not found: {}", id)))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get_category(&self, id: CategoryId) -> Result<Category> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color, created_at FROM categories WHERE id = ?1")?;

        match stmt.query_row(params![id], Self::category_from_row) {
            Ok(category) => Ok(category),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(Error::NotFound(format!("Category not found: {}", id)))
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl RemoteStore for SqliteStore {
    fn fetch_categories(&self, user: &UserId) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, color, created_at FROM categories
             WHERE user_id = ?1 ORDER BY created_at, id",
        )?;

        let categories = stmt
            .query_map(params![user.as_str()], Self::category_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    fn insert_category(&self, user: &UserId, name: &str, color: Option<&str>) -> Result<Category> {
        let now = timestamp_to_datetime(datetime_to_timestamp(&Utc::now()));
        self.conn.execute(
            "INSERT INTO categories (user_id, name, color, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![user.as_str(), name, color, datetime_to_timestamp(&now)],
        )?;

        Ok(Category {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            color: color.map(|c| c.to_string()),
            created_at: now,
        })
    }

    fn rename_category(&self, id: CategoryId, name: &str) -> Result<Category> {
        let mut category = self.get_category(id)?;
        category.name = name.to_string();

        self.conn.execute(
            "UPDATE categories SET name = ?1 WHERE id = ?2",
            params![category.name, id],
        )?;

        Ok(category)
    }

    fn delete_category(&self, id: CategoryId) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            tracing::debug!(category_id = id, "delete for absent category");
        }

        Ok(())
    }

    fn fetch_notes(&self, user: &UserId) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, content, pinned, category_id, created_at FROM notes
             WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
        )?;

        let notes = stmt
            .query_map(params![user.as_str()], Self::note_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    fn insert_note(&self, user: &UserId, draft: &NoteDraft) -> Result<Note> {
        let now = timestamp_to_datetime(datetime_to_timestamp(&Utc::now()));
        let note = Note {
            id: uuid::Uuid::new_v4().to_string(),
            title: draft.title.trim().to_string(),
            content: draft.content.clone(),
            pinned: draft.pinned,
            category_id: draft.category_id,
            created_at: now,
        };

        self.conn.execute(
            "INSERT INTO notes (id, user_id, title, content, pinned, category_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                note.id,
                user.as_str(),
                note.title,
                note.content,
                note.pinned,
                note.category_id,
                datetime_to_timestamp(&note.created_at),
            ],
        )?;

        Ok(note)
    }

    fn update_note(&self, id: &str, patch: &NotePatch) -> Result<Note> {
        let mut note = self.get_note(id)?;
        patch.apply(&mut note);
        note.title = note.title.trim().to_string();

        self.conn.execute(
            "UPDATE notes SET title = ?1, content = ?2, pinned = ?3, category_id = ?4 WHERE id = ?5",
            params![note.title, note.content, note.pinned, note.category_id, id],
        )?;

        Ok(note)
    }

    fn delete_note(&self, id: &str) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            tracing::debug!(note_id = id, "delete for absent note");
        }

        Ok(())
    }
}
