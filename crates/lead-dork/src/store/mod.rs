//! Append-only search log: the `history` and `saved` keyword tables.

mod sqlite;

pub use sqlite::SqliteSearchLog;

use serde::{Deserialize, Serialize};

/// The two tables the UI writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTable {
    History,
    Saved,
}

impl LogTable {
    pub const fn name(self) -> &'static str {
        match self {
            LogTable::History => "history",
            LogTable::Saved => "saved",
        }
    }
}

/// A stored keyword row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub keyword: String,
    pub category: String,
    pub timestamp: String,
}

/// Storage abstraction so routes can be exercised without a database file.
pub trait SearchLog: Send + Sync {
    fn add(&self, table: LogTable, keyword: &str, category: &str) -> Result<i64, StoreError>;
    /// Newest first.
    fn list(&self, table: LogTable) -> Result<Vec<LogEntry>, StoreError>;
    fn delete(&self, table: LogTable, id: i64) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no entry with id {0}")]
    NotFound(i64),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("could not prepare database directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("search log unavailable: {0}")]
    Unavailable(String),
}
