pub mod error;
pub mod export;
pub mod queries;
pub mod schema;
pub mod stats;
pub mod store;

pub use error::{AggregationParseError, DbError, Result};
pub use store::Store;

use chrono::{Local, NaiveDateTime};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, warn};

/// Storage format for every `created_at` column: local wall-clock time.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub(crate) fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;

        let db = Self::init(conn);
        info!("Database opened at {}", path.display());
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::init(Connection::open_in_memory()?))
    }

    /// Schema problems are logged per table and never stop the open: routes
    /// backed by healthy tables keep working.
    fn init(conn: Connection) -> Self {
        let report = schema::ensure_schema(&conn);
        if !report.failed.is_empty() {
            warn!("Schema incomplete, unavailable tables: {:?}", report.failed);
        }

        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DbError::Lock(e.to_string()))?;
        f(&conn)
    }
}
