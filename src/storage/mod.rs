//! Content history store
//!
//! [`HistoryStore`] owns the ordered, de-duplicated collection of generated
//! records. It is loaded once from a [`KeyValueStore`], mutated through
//! `add`, `import_records` and `clear`, and written through to the backend
//! after every mutation.

use crate::error::{ClipscribeError, Result};
use crate::record::{validate_candidate, ContentRecord};
use serde_json::Value;

pub mod export;
pub mod kv;

pub use kv::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};

/// Storage key holding the serialized history
pub const HISTORY_KEY: &str = "clipscribe.content_history";

/// Maximum number of records kept by `add`
pub const HISTORY_CAPACITY: usize = 50;

/// Outcome of an import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportResult {
    /// Records appended to history
    pub added: usize,
    /// Candidates rejected as invalid or duplicate
    pub skipped: usize,
}

/// Newest-first history of generated scripts
///
/// # Examples
///
/// ```
/// use clipscribe::record::ContentRecord;
/// use clipscribe::storage::{HistoryStore, MemoryKeyValueStore};
///
/// let mut store = HistoryStore::load(MemoryKeyValueStore::new()).unwrap();
/// let record = ContentRecord {
///     topic: "coffee".to_string(),
///     language: "English".to_string(),
///     content: "...".to_string(),
///     date: "2024-01-01T00:00:00Z".to_string(),
/// };
/// store.add(record.clone()).unwrap();
/// store.add(record).unwrap();
/// assert_eq!(store.len(), 1);
/// ```
pub struct HistoryStore<B: KeyValueStore> {
    backend: B,
    records: Vec<ContentRecord>,
    warning: Option<ClipscribeError>,
}

impl<B: KeyValueStore> HistoryStore<B> {
    /// Load history from `backend`
    ///
    /// A missing key yields an empty history. An unparsable blob also yields
    /// an empty history and is reported through [`HistoryStore::warning`] as
    /// [`ClipscribeError::CorruptPersistentState`]; individual invalid entries
    /// are dropped and reported the same way.
    ///
    /// # Errors
    ///
    /// Only backend read failures are returned; corrupt content never is.
    pub fn load(backend: B) -> Result<Self> {
        let raw = backend.get(HISTORY_KEY)?;
        let (records, warning) = match raw {
            None => (Vec::new(), None),
            Some(raw) => decode_history(&raw),
        };

        if let Some(warning) = &warning {
            tracing::warn!("{}", warning);
        }
        tracing::debug!(count = records.len(), "Loaded content history");

        Ok(Self {
            backend,
            records,
            warning,
        })
    }

    /// Problem encountered while loading, if any
    pub fn warning(&self) -> Option<&ClipscribeError> {
        self.warning.as_ref()
    }

    /// Snapshot of the history, newest first
    pub fn list(&self) -> Vec<ContentRecord> {
        self.records.clone()
    }

    /// Snapshot of the record at `index` (0-based, newest first)
    pub fn get(&self, index: usize) -> Option<ContentRecord> {
        self.records.get(index).cloned()
    }

    /// Number of records in history
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether history is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert a newly generated record
    ///
    /// Returns `Ok(false)` without touching history when a duplicate is
    /// already present. Otherwise the record is prepended, history is cut
    /// back to [`HISTORY_CAPACITY`] (oldest dropped) and persisted.
    ///
    /// # Errors
    ///
    /// Returns [`ClipscribeError::InvalidRecord`] for an invalid record, or a
    /// storage error if persisting fails.
    pub fn add(&mut self, record: ContentRecord) -> Result<bool> {
        record.validate()?;

        if self.records.iter().any(|r| r.is_duplicate_of(&record)) {
            tracing::debug!(topic = %record.topic, "Duplicate record, history unchanged");
            return Ok(false);
        }

        let mut next = Vec::with_capacity(self.records.len() + 1);
        next.push(record);
        next.extend(self.records.iter().cloned());
        if next.len() > HISTORY_CAPACITY {
            tracing::debug!(
                evicted = next.len() - HISTORY_CAPACITY,
                "History over capacity, evicting oldest records"
            );
            next.truncate(HISTORY_CAPACITY);
        }

        self.commit(next)?;
        Ok(true)
    }

    /// Merge externally supplied records into history
    ///
    /// `raw` may be one record object or an array of them. Each candidate is
    /// validated on its own; invalid and duplicate candidates are counted as
    /// skipped. Survivors are appended in input order. The capacity limit is
    /// not applied here. History is persisted once, and only when something
    /// was added.
    ///
    /// # Errors
    ///
    /// Returns [`ClipscribeError::InvalidImportFormat`] when `raw` is neither
    /// an object nor an array, or when a non-empty batch holds no valid
    /// record at all. History is left untouched in both cases.
    pub fn import_records(&mut self, raw: &Value) -> Result<ImportResult> {
        let candidates: Vec<&Value> = match raw {
            Value::Object(_) => vec![raw],
            Value::Array(items) => items.iter().collect(),
            _ => {
                return Err(ClipscribeError::InvalidImportFormat(
                    "expected a record object or an array of records".to_string(),
                )
                .into())
            }
        };

        let mut merged = self.records.clone();
        let mut result = ImportResult::default();
        let mut valid = 0usize;

        for (index, candidate) in candidates.iter().enumerate() {
            let record = match validate_candidate(candidate) {
                Ok(record) => record,
                Err(e) => {
                    tracing::debug!(index, "Skipping invalid import entry: {}", e);
                    result.skipped += 1;
                    continue;
                }
            };
            valid += 1;

            if merged.iter().any(|r| r.is_duplicate_of(&record)) {
                result.skipped += 1;
                continue;
            }

            merged.push(record);
            result.added += 1;
        }

        if valid == 0 && result.skipped > 0 {
            return Err(ClipscribeError::InvalidImportFormat(format!(
                "none of the {} entries is a valid record",
                result.skipped
            ))
            .into());
        }

        if result.added > 0 {
            self.commit(merged)?;
        }

        tracing::info!(
            added = result.added,
            skipped = result.skipped,
            total = self.records.len(),
            "Imported content history"
        );
        Ok(result)
    }

    /// Parse `bytes` as JSON and import them
    ///
    /// # Errors
    ///
    /// Unparsable input is reported as [`ClipscribeError::InvalidImportFormat`];
    /// otherwise as [`HistoryStore::import_records`].
    pub fn import_json(&mut self, bytes: &[u8]) -> Result<ImportResult> {
        let raw: Value = serde_json::from_slice(bytes).map_err(|e| {
            ClipscribeError::InvalidImportFormat(format!("input is not valid JSON: {}", e))
        })?;
        self.import_records(&raw)
    }

    /// Remove every record and persist the empty history
    ///
    /// Callers are expected to have confirmed this with the user.
    pub fn clear(&mut self) -> Result<()> {
        self.commit(Vec::new())?;
        tracing::info!("Cleared content history");
        Ok(())
    }

    /// Pretty-printed JSON of one record
    pub fn export_one(&self, record: &ContentRecord) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(record)?)
    }

    /// Pretty-printed JSON array of the whole history, newest first
    pub fn export_all(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.records)?)
    }

    /// Persist `next` and only then make it the visible history
    fn commit(&mut self, next: Vec<ContentRecord>) -> Result<()> {
        let blob = serde_json::to_string(&next)?;
        self.backend.set(HISTORY_KEY, &blob)?;
        self.records = next;
        Ok(())
    }
}

/// Decode a persisted blob, recovering from corruption
fn decode_history(raw: &str) -> (Vec<ContentRecord>, Option<ClipscribeError>) {
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) => {
            return (
                Vec::new(),
                Some(ClipscribeError::CorruptPersistentState(
                    "stored history is not a JSON array; starting with empty history".to_string(),
                )),
            )
        }
        Err(e) => {
            return (
                Vec::new(),
                Some(ClipscribeError::CorruptPersistentState(format!(
                    "stored history is not valid JSON ({}); starting with empty history",
                    e
                ))),
            )
        }
    };

    let total = entries.len();
    let mut records: Vec<ContentRecord> = Vec::with_capacity(total);
    let mut invalid = 0usize;
    let mut duplicates = 0usize;

    for entry in &entries {
        match validate_candidate(entry) {
            Ok(record) if records.iter().any(|r| r.is_duplicate_of(&record)) => duplicates += 1,
            Ok(record) => records.push(record),
            Err(_) => invalid += 1,
        }
    }

    let mut problems = Vec::new();
    if invalid > 0 {
        problems.push(format!(
            "dropped {} invalid of {} stored history entries",
            invalid, total
        ));
    }
    if duplicates > 0 {
        problems.push(format!(
            "dropped {} duplicate of {} stored history entries",
            duplicates, total
        ));
    }
    let warning = (!problems.is_empty())
        .then(|| ClipscribeError::CorruptPersistentState(problems.join("; ")));

    (records, warning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(n: usize) -> ContentRecord {
        ContentRecord {
            topic: format!("topic {}", n),
            language: "English".to_string(),
            content: format!("script number {}", n),
            date: format!("2024-01-01T00:00:{:02}Z", n % 60),
        }
    }

    fn empty_store() -> HistoryStore<MemoryKeyValueStore> {
        HistoryStore::load(MemoryKeyValueStore::new()).expect("load failed")
    }

    fn persisted(store: &HistoryStore<MemoryKeyValueStore>) -> Vec<ContentRecord> {
        let raw = store
            .backend
            .get(HISTORY_KEY)
            .expect("get failed")
            .expect("history key missing");
        serde_json::from_str(&raw).expect("persisted blob is not a record array")
    }

    fn kind(err: &anyhow::Error) -> &ClipscribeError {
        err.downcast_ref::<ClipscribeError>()
            .expect("expected a ClipscribeError")
    }

    #[test]
    fn test_load_missing_key_is_empty_without_warning() {
        let store = empty_store();
        assert!(store.is_empty());
        assert!(store.warning().is_none());
    }

    #[test]
    fn test_load_corrupt_blob_recovers_empty_with_warning() {
        let backend = MemoryKeyValueStore::with_entry(HISTORY_KEY, "{not json");
        let mut store = HistoryStore::load(backend).expect("load must not fail");
        assert!(store.is_empty());
        assert!(matches!(
            store.warning(),
            Some(ClipscribeError::CorruptPersistentState(_))
        ));

        assert!(store.add(record(1)).expect("add after corruption"));
        assert_eq!(store.len(), 1);
        assert_eq!(persisted(&store), vec![record(1)]);
    }

    #[test]
    fn test_load_non_array_blob_is_corrupt() {
        let backend = MemoryKeyValueStore::with_entry(HISTORY_KEY, "{\"topic\":\"x\"}");
        let store = HistoryStore::load(backend).unwrap();
        assert!(store.is_empty());
        assert!(store.warning().is_some());
    }

    #[test]
    fn test_load_drops_invalid_entries_and_keeps_rest() {
        let blob = json!([
            record(1),
            {"topic": "broken", "language": "English", "date": "2024-01-01T00:00:00Z"},
            record(2)
        ])
        .to_string();
        let store = HistoryStore::load(MemoryKeyValueStore::with_entry(HISTORY_KEY, blob)).unwrap();
        assert_eq!(store.list(), vec![record(1), record(2)]);
        let warning = store.warning().expect("warning expected").to_string();
        assert!(warning.contains("dropped 1 invalid of 3"));
    }

    #[test]
    fn test_load_drops_later_duplicates_and_keeps_first() {
        let mut later = record(1);
        later.date = "2024-09-09T09:09:09Z".to_string();
        let blob = json!([record(1), record(2), later]).to_string();

        let store = HistoryStore::load(MemoryKeyValueStore::with_entry(HISTORY_KEY, blob)).unwrap();
        assert_eq!(store.list(), vec![record(1), record(2)]);
        let warning = store.warning().expect("warning expected").to_string();
        assert!(warning.contains("dropped 1 duplicate of 3"));
        assert!(!warning.contains("invalid"));
    }

    #[test]
    fn test_load_reports_invalid_and_duplicate_entries_together() {
        let blob = json!([record(1), {"topic": "broken"}, record(1)]).to_string();
        let store = HistoryStore::load(MemoryKeyValueStore::with_entry(HISTORY_KEY, blob)).unwrap();
        assert_eq!(store.list(), vec![record(1)]);
        let warning = store.warning().expect("warning expected").to_string();
        assert!(warning.contains("dropped 1 invalid of 3"));
        assert!(warning.contains("dropped 1 duplicate of 3"));
    }

    /// Backend whose writes always fail
    struct FailingSet(MemoryKeyValueStore);

    impl KeyValueStore for FailingSet {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(ClipscribeError::Storage("disk full".to_string()).into())
        }
    }

    fn failing_store_with_one_record() -> HistoryStore<FailingSet> {
        let blob = json!([record(1)]).to_string();
        HistoryStore::load(FailingSet(MemoryKeyValueStore::with_entry(HISTORY_KEY, blob)))
            .expect("load failed")
    }

    #[test]
    fn test_failed_write_leaves_history_unchanged_on_import() {
        let mut store = failing_store_with_one_record();
        let err = store
            .import_records(&json!([record(2), record(3)]))
            .unwrap_err();
        assert!(matches!(kind(&err), ClipscribeError::Storage(_)));
        assert_eq!(store.list(), vec![record(1)]);
    }

    #[test]
    fn test_failed_write_leaves_history_unchanged_on_add() {
        let mut store = failing_store_with_one_record();
        let err = store.add(record(2)).unwrap_err();
        assert!(matches!(kind(&err), ClipscribeError::Storage(_)));
        assert_eq!(store.list(), vec![record(1)]);
    }

    #[test]
    fn test_failed_write_leaves_history_unchanged_on_clear() {
        let mut store = failing_store_with_one_record();
        assert!(store.clear().is_err());
        assert_eq!(store.list(), vec![record(1)]);
    }

    #[test]
    fn test_add_prepends_and_persists() {
        let mut store = empty_store();
        assert!(store.add(record(1)).unwrap());
        assert!(store.add(record(2)).unwrap());
        assert_eq!(store.list(), vec![record(2), record(1)]);
        assert_eq!(persisted(&store), store.list());
    }

    #[test]
    fn test_add_duplicate_keeps_original_date() {
        let mut store = empty_store();
        let first = ContentRecord {
            topic: "coffee".to_string(),
            language: "English".to_string(),
            content: "...".to_string(),
            date: "2024-01-01T00:00:00Z".to_string(),
        };
        let mut second = first.clone();
        second.date = "2024-06-01T00:00:00Z".to_string();

        assert!(store.add(first).unwrap());
        assert!(!store.add(second).unwrap());

        let list = store.list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].date, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_add_duplicate_anywhere_is_noop() {
        let mut store = empty_store();
        for n in 0..5 {
            store.add(record(n)).unwrap();
        }
        assert!(!store.add(record(0)).unwrap());
        assert_eq!(store.len(), 5);
        assert_eq!(store.get(0), Some(record(4)));
    }

    #[test]
    fn test_add_rejects_invalid_record_without_change() {
        let mut store = empty_store();
        store.add(record(1)).unwrap();
        let mut bad = record(2);
        bad.content = String::new();

        let err = store.add(bad).unwrap_err();
        assert!(matches!(
            kind(&err),
            ClipscribeError::InvalidRecord { field, .. } if field == "content"
        ));
        assert_eq!(store.list(), vec![record(1)]);
    }

    #[test]
    fn test_add_evicts_oldest_beyond_capacity() {
        let mut store = empty_store();
        for n in 0..=HISTORY_CAPACITY {
            store.add(record(n)).unwrap();
        }
        let list = store.list();
        assert_eq!(list.len(), HISTORY_CAPACITY);
        assert_eq!(list[0], record(HISTORY_CAPACITY));
        assert_eq!(list[HISTORY_CAPACITY - 1], record(1));
        assert!(!list.contains(&record(0)));
        assert_eq!(persisted(&store).len(), HISTORY_CAPACITY);
    }

    #[test]
    fn test_import_single_object() {
        let mut store = empty_store();
        let result = store.import_records(&json!(record(1))).unwrap();
        assert_eq!(result, ImportResult { added: 1, skipped: 0 });
        assert_eq!(store.list(), vec![record(1)]);
    }

    #[test]
    fn test_import_partial_success() {
        let mut store = empty_store();
        let raw = json!([
            record(1),
            {"topic": "t", "language": "English", "date": "2024-01-01T00:00:00Z"}
        ]);
        let result = store.import_records(&raw).unwrap();
        assert_eq!(result, ImportResult { added: 1, skipped: 1 });
        assert_eq!(store.list(), vec![record(1)]);
    }

    #[test]
    fn test_import_appends_after_existing_in_input_order() {
        let mut store = empty_store();
        store.add(record(1)).unwrap();
        let raw = json!([record(2), record(3)]);
        store.import_records(&raw).unwrap();
        assert_eq!(store.list(), vec![record(1), record(2), record(3)]);
        assert_eq!(persisted(&store), store.list());
    }

    #[test]
    fn test_import_skips_duplicates_of_history_and_batch() {
        let mut store = empty_store();
        store.add(record(1)).unwrap();
        let mut redated = record(1);
        redated.date = "2025-01-01T00:00:00Z".to_string();
        let raw = json!([redated, record(2), record(2)]);

        let result = store.import_records(&raw).unwrap();
        assert_eq!(result, ImportResult { added: 1, skipped: 2 });
        assert_eq!(store.list(), vec![record(1), record(2)]);
    }

    #[test]
    fn test_import_only_duplicates_is_ok() {
        let mut store = empty_store();
        store.add(record(1)).unwrap();
        let result = store.import_records(&json!([record(1)])).unwrap();
        assert_eq!(result, ImportResult { added: 0, skipped: 1 });
    }

    #[test]
    fn test_import_does_not_apply_capacity() {
        let mut store = empty_store();
        let batch: Vec<ContentRecord> = (0..HISTORY_CAPACITY + 10).map(record).collect();
        let result = store.import_records(&json!(batch)).unwrap();
        assert_eq!(result.added, HISTORY_CAPACITY + 10);
        assert_eq!(store.len(), HISTORY_CAPACITY + 10);

        // the next generation brings it back to capacity
        store.add(record(999)).unwrap();
        assert_eq!(store.len(), HISTORY_CAPACITY);
        assert_eq!(store.get(0), Some(record(999)));
    }

    #[test]
    fn test_import_rejects_scalar_and_leaves_history() {
        let mut store = empty_store();
        store.add(record(1)).unwrap();
        let err = store.import_records(&json!(5)).unwrap_err();
        assert!(matches!(kind(&err), ClipscribeError::InvalidImportFormat(_)));
        assert_eq!(store.list(), vec![record(1)]);
        assert_eq!(persisted(&store), vec![record(1)]);
    }

    #[test]
    fn test_import_all_invalid_batch_is_error() {
        let mut store = empty_store();
        let err = store
            .import_records(&json!([{"topic": "x"}, 3, "nope"]))
            .unwrap_err();
        assert!(matches!(kind(&err), ClipscribeError::InvalidImportFormat(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_import_invalid_single_object_is_error() {
        let mut store = empty_store();
        let err = store.import_records(&json!({"topic": "x"})).unwrap_err();
        assert!(matches!(kind(&err), ClipscribeError::InvalidImportFormat(_)));
    }

    #[test]
    fn test_import_empty_array_is_noop() {
        let mut store = empty_store();
        let result = store.import_records(&json!([])).unwrap();
        assert_eq!(result, ImportResult::default());
        assert!(store.backend.get(HISTORY_KEY).unwrap().is_none());
    }

    #[test]
    fn test_import_json_rejects_malformed_bytes() {
        let mut store = empty_store();
        let err = store.import_json(b"[{\"topic\":").unwrap_err();
        assert!(matches!(kind(&err), ClipscribeError::InvalidImportFormat(_)));
    }

    #[test]
    fn test_export_all_roundtrips_through_import() {
        let mut source = empty_store();
        for n in 0..7 {
            source.add(record(n)).unwrap();
        }
        let bytes = source.export_all().unwrap();

        let mut target = empty_store();
        let result = target.import_json(&bytes).unwrap();
        assert_eq!(result, ImportResult { added: 7, skipped: 0 });
        assert_eq!(target.list(), source.list());
        assert_eq!(target.export_all().unwrap(), bytes);
    }

    #[test]
    fn test_export_roundtrips_escaped_and_non_ascii_text() {
        let tricky = ContentRecord {
            topic: "Kopi \"tubruk\" \u{2615} café".to_string(),
            language: "日本語".to_string(),
            content: "HOOK: \"Pagi!\"\n\tLine two \\ back-slash\r\nemoji 🎬 end".to_string(),
            date: "2024-03-04T05:06:07.089+07:00".to_string(),
        };
        let mut source = empty_store();
        source.add(record(1)).unwrap();
        source.add(tricky.clone()).unwrap();
        let bytes = source.export_all().unwrap();

        let mut target = empty_store();
        let result = target.import_json(&bytes).unwrap();
        assert_eq!(result, ImportResult { added: 2, skipped: 0 });
        assert_eq!(target.get(0), Some(tricky.clone()));
        assert_eq!(target.export_all().unwrap(), bytes);

        let single = source.export_one(&tricky).unwrap();
        let mut one = empty_store();
        one.import_json(&single).unwrap();
        assert_eq!(one.export_one(&one.get(0).unwrap()).unwrap(), single);
    }

    #[test]
    fn test_export_one_is_pretty_and_importable() {
        let store = empty_store();
        let bytes = store.export_one(&record(3)).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains("\n  \"topic\": \"topic 3\""));

        let mut target = empty_store();
        let result = target.import_json(&bytes).unwrap();
        assert_eq!(result, ImportResult { added: 1, skipped: 0 });
        assert_eq!(target.get(0), Some(record(3)));
    }

    #[test]
    fn test_clear_empties_and_persists() {
        let mut store = empty_store();
        store.add(record(1)).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
        assert!(persisted(&store).is_empty());
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let mut store = empty_store();
        store.add(record(1)).unwrap();
        let snapshot = store.list();
        store.add(record(2)).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len(), 2);
    }
}
