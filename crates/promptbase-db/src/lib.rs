//! SQLite storage layer for promptbase.
//!
//! Provides a `Database` struct that owns the SQLite connection and hands
//! out a `Prompts` store for CRUD access to the `prompts` table.

mod error;
mod prompts;

pub use error::StoreError;
pub use prompts::{NewPrompt, Prompt, Prompts, SortOrder};

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// The main database struct that owns the SQLite connection.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at a specific path, creating the schema
    /// if it does not exist yet.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (useful for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Get the default database path,
    /// `~/.local/share/promptbase/promptbase.db` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("promptbase")
            .join("promptbase.db")
    }

    /// Access the prompts store.
    pub fn prompts(&self) -> Prompts<'_> {
        let conn = self.conn.lock().expect("Database lock poisoned");
        Prompts::new(conn)
    }

    /// Initialize the database schema. Idempotent.
    fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS prompts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                prompt TEXT NOT NULL,
                is_favorite INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_prompts_created_at ON prompts(created_at DESC);
            "#,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_prompt(title: &str, body: &str) -> NewPrompt {
        NewPrompt {
            title: title.to_string(),
            body: body.to_string(),
            is_favorite: false,
        }
    }

    #[test]
    fn test_insert_and_search_empty_query() {
        let db = Database::open_in_memory().unwrap();

        let saved = db
            .prompts()
            .insert(&new_prompt("Haiku", "cherry blossoms"))
            .unwrap();
        assert!(saved.id > 0);
        assert!(!saved.is_favorite);

        let all = db.prompts().search("", SortOrder::NewestFirst).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, saved.id);
        assert_eq!(all[0].title, "Haiku");
        assert_eq!(all[0].body, "cherry blossoms");
    }

    #[test]
    fn test_insert_rejects_empty_fields() {
        let db = Database::open_in_memory().unwrap();

        let err = db.prompts().insert(&new_prompt("", "some body")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let err = db.prompts().insert(&new_prompt("some title", "  ")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        // Nothing persisted after either rejection
        let all = db.prompts().search("", SortOrder::NewestFirst).unwrap();
        assert!(all.is_empty());
    }

    #[test]
    fn test_toggle_favorite_twice_restores() {
        let db = Database::open_in_memory().unwrap();

        let saved = db.prompts().insert(&new_prompt("t", "b")).unwrap();
        assert!(!saved.is_favorite);

        assert_eq!(db.prompts().toggle_favorite(saved.id).unwrap(), 1);
        assert!(db.prompts().get(saved.id).unwrap().unwrap().is_favorite);

        assert_eq!(db.prompts().toggle_favorite(saved.id).unwrap(), 1);
        assert!(!db.prompts().get(saved.id).unwrap().unwrap().is_favorite);
    }

    #[test]
    fn test_delete_removes_from_results() {
        let db = Database::open_in_memory().unwrap();

        let saved = db.prompts().insert(&new_prompt("Haiku", "cherry")).unwrap();
        assert!(db.prompts().delete(saved.id).unwrap());

        assert!(db.prompts().get(saved.id).unwrap().is_none());
        assert!(db.prompts().search("", SortOrder::NewestFirst).unwrap().is_empty());
        assert!(db
            .prompts()
            .search("haiku", SortOrder::NewestFirst)
            .unwrap()
            .is_empty());

        // Deleting again is a no-op
        assert!(!db.prompts().delete(saved.id).unwrap());
    }

    #[test]
    fn test_search_case_insensitive_title_or_body() {
        let db = Database::open_in_memory().unwrap();

        db.prompts()
            .insert(&new_prompt("Haiku", "cherry blossoms"))
            .unwrap();
        db.prompts()
            .insert(&new_prompt("Grocery list", "milk and eggs"))
            .unwrap();

        let by_title = db.prompts().search("haiku", SortOrder::NewestFirst).unwrap();
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "Haiku");

        let by_body = db
            .prompts()
            .search("BLOSSOMS", SortOrder::NewestFirst)
            .unwrap();
        assert_eq!(by_body.len(), 1);
        assert_eq!(by_body[0].title, "Haiku");

        let none = db.prompts().search("sonnet", SortOrder::NewestFirst).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_sort_orders_are_reverses() {
        let db = Database::open_in_memory().unwrap();

        let a = db.prompts().insert(&new_prompt("first", "a")).unwrap();
        let b = db.prompts().insert(&new_prompt("second", "b")).unwrap();
        let c = db.prompts().insert(&new_prompt("third", "c")).unwrap();

        let newest = db.prompts().search("", SortOrder::NewestFirst).unwrap();
        let oldest = db.prompts().search("", SortOrder::OldestFirst).unwrap();

        let newest_ids: Vec<i64> = newest.iter().map(|p| p.id).collect();
        let oldest_ids: Vec<i64> = oldest.iter().map(|p| p.id).collect();

        assert_eq!(oldest_ids, vec![a.id, b.id, c.id]);
        let mut reversed = newest_ids.clone();
        reversed.reverse();
        assert_eq!(oldest_ids, reversed);
    }

    #[test]
    fn test_update_title_only_preserves_rest() {
        let db = Database::open_in_memory().unwrap();

        let saved = db
            .prompts()
            .insert(&NewPrompt {
                title: "old title".to_string(),
                body: "the body".to_string(),
                is_favorite: true,
            })
            .unwrap();

        let affected = db
            .prompts()
            .update(
                saved.id,
                &NewPrompt {
                    title: "new title".to_string(),
                    body: saved.body.clone(),
                    is_favorite: saved.is_favorite,
                },
            )
            .unwrap();
        assert_eq!(affected, 1);

        let updated = db.prompts().get(saved.id).unwrap().unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.title, "new title");
        assert_eq!(updated.body, "the body");
        assert!(updated.is_favorite);
        assert!(updated.updated_at >= saved.updated_at);
    }

    #[test]
    fn test_update_rejects_empty_fields() {
        let db = Database::open_in_memory().unwrap();

        let saved = db.prompts().insert(&new_prompt("t", "b")).unwrap();
        let err = db
            .prompts()
            .update(saved.id, &new_prompt("", "b"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        // Row untouched
        let row = db.prompts().get(saved.id).unwrap().unwrap();
        assert_eq!(row.title, "t");
    }

    #[test]
    fn test_mutations_on_missing_id_report_zero_rows() {
        let db = Database::open_in_memory().unwrap();

        assert_eq!(db.prompts().update(42, &new_prompt("t", "b")).unwrap(), 0);
        assert_eq!(db.prompts().toggle_favorite(42).unwrap(), 0);
        assert!(!db.prompts().delete(42).unwrap());
    }

    #[test]
    fn test_schema_init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idempotent.db");

        {
            let db = Database::open_at(&path).unwrap();
            db.prompts().insert(&new_prompt("t", "b")).unwrap();
        }

        // Reopening must not fail or lose data
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.prompts().search("", SortOrder::NewestFirst).unwrap().len(), 1);
    }
}
