//! Prompts store: parameterized CRUD over the `prompts` table.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::sync::MutexGuard;

use crate::error::StoreError;

/// A persisted prompt row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: i64,
    pub title: String,
    /// The prompt text itself (the `prompt` column).
    pub body: String,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input shape for an unsaved prompt (no id or timestamps yet).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPrompt {
    pub title: String,
    pub body: String,
    pub is_favorite: bool,
}

impl NewPrompt {
    /// Reject empty required fields before any statement runs.
    fn validate(&self) -> Result<(), StoreError> {
        if self.title.trim().is_empty() {
            return Err(StoreError::empty_field("title"));
        }
        if self.body.trim().is_empty() {
            return Err(StoreError::empty_field("prompt"));
        }
        Ok(())
    }
}

/// Sort order for search results, keyed on creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl SortOrder {
    /// Flip between the two orders.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::NewestFirst => SortOrder::OldestFirst,
            SortOrder::OldestFirst => SortOrder::NewestFirst,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::NewestFirst => "Newest First",
            SortOrder::OldestFirst => "Oldest First",
        }
    }

    /// ORDER BY clause; id breaks ties between same-instant rows.
    fn order_by(self) -> &'static str {
        match self {
            SortOrder::NewestFirst => "ORDER BY created_at DESC, id DESC",
            SortOrder::OldestFirst => "ORDER BY created_at ASC, id ASC",
        }
    }
}

const PROMPT_COLUMNS: &str = "id, title, prompt, is_favorite, created_at, updated_at";

/// Prompts store with a borrowed connection.
pub struct Prompts<'db> {
    conn: MutexGuard<'db, Connection>,
}

impl<'db> Prompts<'db> {
    pub(crate) fn new(conn: MutexGuard<'db, Connection>) -> Self {
        Self { conn }
    }

    /// Insert a new prompt, returning the full row with its assigned id
    /// and timestamps.
    pub fn insert(&self, input: &NewPrompt) -> Result<Prompt, StoreError> {
        input.validate()?;

        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO prompts (title, prompt, is_favorite, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                input.title,
                input.body,
                input.is_favorite,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )?;

        Ok(Prompt {
            id: self.conn.last_insert_rowid(),
            title: input.title.clone(),
            body: input.body.clone(),
            is_favorite: input.is_favorite,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a prompt by id.
    pub fn get(&self, id: i64) -> Result<Option<Prompt>, StoreError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {PROMPT_COLUMNS} FROM prompts WHERE id = ?1"),
                params![id],
                Self::row_to_prompt,
            )
            .optional()?;
        Ok(row)
    }

    /// Search prompts whose title or body contains `query`
    /// case-insensitively. An empty query matches every row. The result is
    /// a snapshot materialized at call time.
    pub fn search(&self, query: &str, order: SortOrder) -> Result<Vec<Prompt>, StoreError> {
        let sql = format!(
            "SELECT {PROMPT_COLUMNS} FROM prompts
             WHERE LOWER(title) LIKE '%' || LOWER(?1) || '%'
                OR LOWER(prompt) LIKE '%' || LOWER(?1) || '%'
             {}",
            order.order_by()
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![query], Self::row_to_prompt)?;

        let mut prompts = Vec::new();
        for row in rows {
            prompts.push(row?);
        }

        Ok(prompts)
    }

    /// Rewrite title, body, and favorite flag for an existing row and
    /// refresh `updated_at`. Returns the number of rows affected (0 when
    /// the id no longer exists).
    pub fn update(&self, id: i64, input: &NewPrompt) -> Result<usize, StoreError> {
        input.validate()?;

        let affected = self.conn.execute(
            "UPDATE prompts SET title = ?1, prompt = ?2, is_favorite = ?3, updated_at = ?4
             WHERE id = ?5",
            params![
                input.title,
                input.body,
                input.is_favorite,
                Utc::now().to_rfc3339(),
                id,
            ],
        )?;
        Ok(affected)
    }

    /// Flip `is_favorite` in place. Returns rows affected (0 when the id
    /// no longer exists).
    pub fn toggle_favorite(&self, id: i64) -> Result<usize, StoreError> {
        let affected = self.conn.execute(
            "UPDATE prompts SET is_favorite = NOT is_favorite, updated_at = ?1 WHERE id = ?2",
            params![Utc::now().to_rfc3339(), id],
        )?;
        Ok(affected)
    }

    /// Delete a prompt by id. Returns true if a row was removed.
    pub fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let affected = self
            .conn
            .execute("DELETE FROM prompts WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    fn row_to_prompt(row: &rusqlite::Row) -> Result<Prompt, rusqlite::Error> {
        let created_at_str: String = row.get(4)?;
        let updated_at_str: String = row.get(5)?;

        Ok(Prompt {
            id: row.get(0)?,
            title: row.get(1)?,
            body: row.get(2)?,
            is_favorite: row.get(3)?,
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
            updated_at: DateTime::parse_from_rfc3339(&updated_at_str)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}
