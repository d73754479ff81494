use clipscribe::record::ContentRecord;
use clipscribe::storage::{HistoryStore, SqliteKeyValueStore};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(dead_code)]
pub fn create_temp_history() -> (HistoryStore<SqliteKeyValueStore>, TempDir, PathBuf) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let db_path = tmp.path().join("history.db");
    let backend =
        SqliteKeyValueStore::new_with_path(&db_path).expect("failed to create sqlite store");
    let store = HistoryStore::load(backend).expect("failed to load history");
    (store, tmp, db_path)
}

#[allow(dead_code)]
pub fn reopen_history(db_path: &Path) -> HistoryStore<SqliteKeyValueStore> {
    let backend = SqliteKeyValueStore::new_with_path(db_path).expect("failed to reopen store");
    HistoryStore::load(backend).expect("failed to load history")
}

#[allow(dead_code)]
pub fn sample_record(n: usize) -> ContentRecord {
    ContentRecord {
        topic: format!("topic {}", n),
        language: if n % 2 == 0 { "English" } else { "Indonesian" }.to_string(),
        content: format!("HOOK: scene {}\nNARRATIVE: ...", n),
        date: format!("2024-02-{:02}T10:00:00.000Z", (n % 28) + 1),
    }
}

#[allow(dead_code)]
pub fn temp_file(contents: &str, name: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let path = temp_dir.path().join(name);
    fs::write(&path, contents).expect("failed to write file");
    (temp_dir, path)
}
