//! Feedback Manager for tabshell.
//!
//! Persists user feedback submissions in SQLite via `rusqlite`.

use rusqlite::{params, Connection};

use crate::api::schema::InsertFeedback;
use crate::database::unix_now;
use crate::types::errors::StoreError;
use crate::types::feedback::Feedback;

/// Trait defining feedback storage operations.
pub trait FeedbackManagerTrait {
    fn create(&mut self, input: &InsertFeedback) -> Result<Feedback, StoreError>;
    fn list(&self) -> Result<Vec<Feedback>, StoreError>;
}

/// Feedback manager backed by a SQLite connection.
pub struct FeedbackManager<'a> {
    conn: &'a Connection,
}

impl<'a> FeedbackManager<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn row_to_feedback(row: &rusqlite::Row) -> rusqlite::Result<Feedback> {
        Ok(Feedback {
            id: row.get(0)?,
            message: row.get(1)?,
            rating: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

impl<'a> FeedbackManagerTrait for FeedbackManager<'a> {
    fn create(&mut self, input: &InsertFeedback) -> Result<Feedback, StoreError> {
        let created_at = unix_now();
        self.conn.execute(
            "INSERT INTO feedback (message, rating, created_at) VALUES (?1, ?2, ?3)",
            params![input.message, input.rating, created_at],
        )?;
        Ok(Feedback {
            id: self.conn.last_insert_rowid(),
            message: input.message.clone(),
            rating: input.rating,
            created_at,
        })
    }

    /// Lists feedback, newest first.
    fn list(&self) -> Result<Vec<Feedback>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, message, rating, created_at FROM feedback ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], Self::row_to_feedback)?;
        let records = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}
