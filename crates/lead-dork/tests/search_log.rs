//! The search log persists keyword history and saved searches in a SQLite file.

use lead_dork::store::{LogTable, SearchLog, SqliteSearchLog, StoreError};

#[test]
fn entries_survive_reopening_the_database() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("nested").join("database.db");

    {
        let log = SqliteSearchLog::open(&db_path).expect("database created");
        log.add(LogTable::History, "crm software", "Competitors")
            .expect("history stored");
        log.add(LogTable::Saved, "site:acme.io careers", "Hiring")
            .expect("saved stored");
    }

    let log = SqliteSearchLog::open(&db_path).expect("database reopened");
    let history = log.list(LogTable::History).expect("history listed");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].keyword, "crm software");
    assert_eq!(history[0].category, "Competitors");
    assert!(!history[0].timestamp.is_empty());

    let saved = log.list(LogTable::Saved).expect("saved listed");
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].keyword, "site:acme.io careers");
}

#[test]
fn tables_are_independent() {
    let log = SqliteSearchLog::open_in_memory().expect("in-memory db");
    let id = log
        .add(LogTable::History, "erp", "Leads")
        .expect("history stored");

    let err = log
        .delete(LogTable::Saved, id)
        .expect_err("id belongs to history");
    assert!(matches!(err, StoreError::NotFound(missing) if missing == id));

    log.delete(LogTable::History, id).expect("deleted");
    assert!(log.list(LogTable::History).expect("listed").is_empty());
}
