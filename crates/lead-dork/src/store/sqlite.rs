use super::{LogEntry, LogTable, SearchLog, StoreError};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

const TABLES: [LogTable; 2] = [LogTable::History, LogTable::Saved];

/// [`SearchLog`] backed by a single SQLite connection.
pub struct SqliteSearchLog {
    conn: Mutex<Connection>,
}

impl SqliteSearchLog {
    /// Open (creating parent directories and tables as needed).
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "opened search log");
        Self::initialize(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(conn: Connection) -> Result<Self, StoreError> {
        for table in TABLES {
            conn.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    keyword TEXT,
                    category TEXT,
                    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
                )",
                table.name()
            ))?;
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let guard = self
            .conn
            .lock()
            .map_err(|_| StoreError::Unavailable("connection mutex poisoned".to_string()))?;
        f(&guard)
    }
}

impl SearchLog for SqliteSearchLog {
    fn add(&self, table: LogTable, keyword: &str, category: &str) -> Result<i64, StoreError> {
        if keyword.trim().is_empty() {
            return Err(StoreError::MissingField("keyword"));
        }
        if category.trim().is_empty() {
            return Err(StoreError::MissingField("category"));
        }

        self.with_conn(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO {}(keyword, category) VALUES (?1, ?2)",
                    table.name()
                ),
                params![keyword, category],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn list(&self, table: LogTable) -> Result<Vec<LogEntry>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT id, keyword, category, timestamp FROM {} ORDER BY id DESC",
                table.name()
            ))?;
            let rows = stmt.query_map([], |row| {
                Ok(LogEntry {
                    id: row.get(0)?,
                    keyword: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    category: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    timestamp: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
        })
    }

    fn delete(&self, table: LogTable, id: i64) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            let removed = conn.execute(
                &format!("DELETE FROM {} WHERE id = ?1", table.name()),
                params![id],
            )?;
            if removed == 0 {
                return Err(StoreError::NotFound(id));
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_listed_newest_first() {
        let log = SqliteSearchLog::open_in_memory().expect("in-memory db");
        log.add(LogTable::History, "crm", "Sales").expect("insert");
        log.add(LogTable::History, "devops", "Tech").expect("insert");

        let entries = log.list(LogTable::History).expect("list");

        let keywords: Vec<_> = entries.iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["devops", "crm"]);
        assert!(!entries[0].timestamp.is_empty());
    }

    #[test]
    fn tables_are_independent() {
        let log = SqliteSearchLog::open_in_memory().expect("in-memory db");
        log.add(LogTable::Saved, "saas", "Product").expect("insert");

        assert!(log.list(LogTable::History).expect("list").is_empty());
        assert_eq!(log.list(LogTable::Saved).expect("list").len(), 1);
    }

    #[test]
    fn delete_removes_only_the_requested_row() {
        let log = SqliteSearchLog::open_in_memory().expect("in-memory db");
        let first = log.add(LogTable::Saved, "ai", "Tech").expect("insert");
        log.add(LogTable::Saved, "cloud", "Tech").expect("insert");

        log.delete(LogTable::Saved, first).expect("delete");

        let entries = log.list(LogTable::Saved).expect("list");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].keyword, "cloud");
        assert!(matches!(
            log.delete(LogTable::Saved, first),
            Err(StoreError::NotFound(id)) if id == first
        ));
    }

    #[test]
    fn blank_fields_are_rejected() {
        let log = SqliteSearchLog::open_in_memory().expect("in-memory db");
        assert!(matches!(
            log.add(LogTable::History, "  ", "Tech"),
            Err(StoreError::MissingField("keyword"))
        ));
        assert!(matches!(
            log.add(LogTable::History, "ai", ""),
            Err(StoreError::MissingField("category"))
        ));
    }

    #[test]
    fn file_backed_log_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("LeadDork").join("database.db");

        let log = SqliteSearchLog::open(&path).expect("file db");
        log.add(LogTable::History, "api", "Tech").expect("insert");
        drop(log);

        let reopened = SqliteSearchLog::open(&path).expect("reopen");
        assert_eq!(reopened.list(LogTable::History).expect("list").len(), 1);
    }
}
