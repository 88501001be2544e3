//! SQLite storage for uploaded files and their rows.
//!
//! The database lives in a single file. Every request acquires its own
//! `Connection` through [`Database::connect`] and drops it when the request
//! finishes, whichever way it finishes. SQLite's own locking is the only
//! coordination between concurrent uploads.
//!
//! - `uploaded_file`: parent records, one per accepted upload.
//! - `uploaded_data`: child rows, inserted in one transaction per upload and
//!   looked up by their `uploaded_file_id` foreign key.

pub mod uploaded_data;
pub mod uploaded_file;

use crate::config::BUSY_TIMEOUT;
use log::info;
use rusqlite::Connection;
use std::path::PathBuf;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS uploadedfile (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS uploadeddata (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    uploaded_file_id INTEGER NOT NULL REFERENCES uploadedfile(id),
    advertiser       TEXT NOT NULL,
    brand            TEXT NOT NULL,
    "start"          TEXT NOT NULL,
    "end"            TEXT NOT NULL,
    format           TEXT NOT NULL,
    platform         TEXT NOT NULL,
    impr             REAL NOT NULL
);

CREATE INDEX IF NOT EXISTS ix_uploadeddata_uploaded_file_id
    ON uploadeddata (uploaded_file_id);
"#;

/// Handle to the SQLite file, shared with the handlers as `web::Data`.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens a connection with foreign keys enforced.
    ///
    /// The connection is closed when the returned value is dropped.
    pub fn connect(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// Creates both tables if they do not exist yet.
    pub fn init(&self) -> rusqlite::Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        info!("Database schema ready at {}", self.path.display());
        Ok(())
    }
}
