//! Download Manager for tabshell.
//!
//! Records download metadata and status updates in SQLite. The file
//! transfer itself happens elsewhere.

use rusqlite::{params, Connection, OptionalExtension};

use crate::api::schema::{InsertDownload, UpdateDownload};
use crate::database::unix_now;
use crate::types::download::DownloadRecord;
use crate::types::errors::StoreError;

/// Trait defining download storage operations.
pub trait DownloadManagerTrait {
    fn create(&mut self, input: &InsertDownload) -> Result<DownloadRecord, StoreError>;
    fn update(&mut self, id: i64, input: &UpdateDownload) -> Result<DownloadRecord, StoreError>;
    fn get(&self, id: i64) -> Result<DownloadRecord, StoreError>;
    fn list(&self) -> Result<Vec<DownloadRecord>, StoreError>;
}

/// Download manager backed by a SQLite connection.
pub struct DownloadManager<'a> {
    conn: &'a Connection,
}

impl<'a> DownloadManager<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<DownloadRecord> {
        Ok(DownloadRecord {
            id: row.get(0)?,
            filename: row.get(1)?,
            url: row.get(2)?,
            status: row.get(3)?,
            size: row.get(4)?,
            progress: row.get(5)?,
            timestamp: row.get(6)?,
        })
    }
}

impl<'a> DownloadManagerTrait for DownloadManager<'a> {
    fn create(&mut self, input: &InsertDownload) -> Result<DownloadRecord, StoreError> {
        let timestamp = unix_now();
        self.conn.execute(
            "INSERT INTO downloads (filename, url, status, size, timestamp) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![input.filename, input.url, input.status, input.size, timestamp],
        )?;
        Ok(DownloadRecord {
            id: self.conn.last_insert_rowid(),
            filename: input.filename.clone(),
            url: input.url.clone(),
            status: input.status,
            size: input.size.clone(),
            progress: None,
            timestamp,
        })
    }

    /// Sets the status, and the progress when one is given. A missing
    /// progress keeps the stored value.
    fn update(&mut self, id: i64, input: &UpdateDownload) -> Result<DownloadRecord, StoreError> {
        let affected = self.conn.execute(
            "UPDATE downloads SET status = ?1, progress = COALESCE(?2, progress) WHERE id = ?3",
            params![input.status, input.progress, id],
        )?;
        if affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        self.get(id)
    }

    fn get(&self, id: i64) -> Result<DownloadRecord, StoreError> {
        self.conn
            .query_row(
                "SELECT id, filename, url, status, size, progress, timestamp FROM downloads WHERE id = ?1",
                params![id],
                Self::row_to_record,
            )
            .optional()?
            .ok_or(StoreError::NotFound(id))
    }

    /// Lists downloads, newest first.
    fn list(&self) -> Result<Vec<DownloadRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, filename, url, status, size, progress, timestamp \
             FROM downloads ORDER BY timestamp DESC, id DESC",
        )?;
        let rows = stmt.query_map([], Self::row_to_record)?;
        let records = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}
