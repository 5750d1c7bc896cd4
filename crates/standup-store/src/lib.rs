//! SQLite-backed activity store: one table per category, append and
//! exact-date query only. Records are immutable once written — there is
//! no update or delete path.

use std::path::Path;

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use standup_core::Category;

pub mod record;

pub use record::{record, record_or_log};

/// Error from the activity store.
///
/// The read path propagates this; the write path is allowed to discard
/// it through [`record_or_log`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("activity store error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("activity store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One persisted activity fact. `date` is `YYYYMMDD` in the reference
/// timezone, derived from the recording instant — never user-supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub url: String,
    pub user: String,
    pub date: String,
}

/// SQLite-backed storage engine.
pub struct ActivityStore {
    conn: Connection,
}

impl ActivityStore {
    /// Open or create the store with one table per tracked category.
    pub fn open_or_create(db_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(db_path)?;
        let store = Self { conn };
        store.apply_pragmas()?;
        store.apply_schema()?;
        Ok(store)
    }

    fn apply_pragmas(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )?;
        Ok(())
    }

    // Table names come from the closed category set, never from input.
    fn apply_schema(&self) -> Result<(), StoreError> {
        for category in Category::ALL {
            let table = category.table();
            self.conn.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    id INTEGER PRIMARY KEY,
                    url TEXT NOT NULL,
                    user TEXT NOT NULL,
                    date TEXT NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_{table}_date ON {table}(date);"
            ))?;
        }
        Ok(())
    }

    /// Append one record to a category's table. Append-only.
    pub fn append(&self, category: Category, record: &ActivityRecord) -> Result<(), StoreError> {
        self.conn.execute(
            &format!(
                "INSERT INTO {} (url, user, date) VALUES (?1, ?2, ?3)",
                category.table()
            ),
            params![record.url, record.user, record.date],
        )?;
        Ok(())
    }

    /// All records of a category for an exact date. Result sets are
    /// small enough to materialize fully; there is no pagination.
    pub fn query_by_date(
        &self,
        category: Category,
        date: &str,
    ) -> Result<Vec<ActivityRecord>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT url, user, date FROM {} WHERE date = ?1",
            category.table()
        ))?;
        let records = stmt
            .query_map(params![date], |row| {
                Ok(ActivityRecord {
                    url: row.get(0)?,
                    user: row.get(1)?,
                    date: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}
