//! History Manager for tabshell.
//!
//! Records page visits and lists them, backed by SQLite via `rusqlite`.
//! Every visit is its own row; repeated visits are not merged.

use rusqlite::{params, Connection};

use crate::api::schema::InsertHistory;
use crate::database::unix_now;
use crate::types::errors::StoreError;
use crate::types::history::HistoryRecord;

/// Trait defining history storage operations.
pub trait HistoryManagerTrait {
    fn create(&mut self, input: &InsertHistory) -> Result<HistoryRecord, StoreError>;
    fn list(&self) -> Result<Vec<HistoryRecord>, StoreError>;
    fn clear_all(&mut self) -> Result<(), StoreError>;
}

/// History manager backed by a SQLite connection.
pub struct HistoryManager<'a> {
    conn: &'a Connection,
}

impl<'a> HistoryManager<'a> {
    /// Creates a new `HistoryManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Reads a single `HistoryRecord` row into a struct.
    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<HistoryRecord> {
        Ok(HistoryRecord {
            id: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            timestamp: row.get(3)?,
        })
    }
}

impl<'a> HistoryManagerTrait for HistoryManager<'a> {
    fn create(&mut self, input: &InsertHistory) -> Result<HistoryRecord, StoreError> {
        let timestamp = unix_now();
        self.conn.execute(
            "INSERT INTO history (url, title, timestamp) VALUES (?1, ?2, ?3)",
            params![input.url, input.title, timestamp],
        )?;
        Ok(HistoryRecord {
            id: self.conn.last_insert_rowid(),
            url: input.url.clone(),
            title: input.title.clone(),
            timestamp,
        })
    }

    /// Lists visits, newest first.
    fn list(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, url, title, timestamp FROM history ORDER BY timestamp DESC, id DESC",
        )?;
        let rows = stmt.query_map([], Self::row_to_record)?;
        let records = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn clear_all(&mut self) -> Result<(), StoreError> {
        self.conn.execute("DELETE FROM history", [])?;
        Ok(())
    }
}
