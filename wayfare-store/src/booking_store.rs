use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};
use wayfare_core::{BookingRecord, BookingRepository};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Database root is not a JSON object")]
    NotAnObject,
}

/// Flat-file booking database: a single JSON document `{ "bookings": [...] }`.
///
/// Every append is a full read-modify-write. Unknown top-level keys are kept
/// as they are. Writes go to a sibling temp file that is renamed over the
/// database, so readers never see a half-written file. Appends within one
/// process are serialized; separate processes still race (last writer wins).
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The whole database. A missing file is an empty database.
    pub async fn read_database(&self) -> Result<Map<String, Value>, StoreError> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No database at {}, starting empty", self.path.display());
                return Ok(empty_database());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&data)? {
            Value::Object(db) => Ok(db),
            _ => Err(StoreError::NotAnObject),
        }
    }

    /// Replace the database wholesale.
    pub async fn write_database(&self, db: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_string_pretty(db)?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, body).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn append(&self, record: &BookingRecord) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut db = self.read_database().await?;
        let mut bookings = db
            .get("bookings")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        bookings.push(record.clone().into_value());
        let count = bookings.len();

        db.insert("bookings".to_string(), Value::Array(bookings));
        self.write_database(&db).await?;
        Ok(count)
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

#[async_trait]
impl BookingRepository for JsonFileStore {
    async fn append_booking(
        &self,
        record: &BookingRecord,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let count = self.append(record).await?;
        info!("Booking stored in {} ({} total)", self.path.display(), count);
        Ok(())
    }

    async fn list_bookings(&self) -> Result<Vec<Value>, Box<dyn std::error::Error + Send + Sync>> {
        let db = self.read_database().await?;
        Ok(db
            .get("bookings")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }
}

fn empty_database() -> Map<String, Value> {
    let mut db = Map::new();
    db.insert("bookings".to_string(), Value::Array(Vec::new()));
    db
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(flight_id: &str, txn: &str) -> BookingRecord {
        let payload = json!({
            "flight": { "id": flight_id },
            "hotel": { "id": "H1" },
            "user": { "name": "John Doe" },
            "payment": { "token": "tok_visa" },
            "transactionId": txn
        });
        BookingRecord::from_payload(payload.as_object().unwrap().clone())
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("db.json"));

        let db = store.read_database().await.unwrap();
        assert_eq!(Value::Object(db), json!({ "bookings": [] }));
        assert!(store.list_bookings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_creates_file_and_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("db.json");
        let store = JsonFileStore::new(&path);

        store.append_booking(&record("F1", "txn_1")).await.unwrap();

        let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["bookings"].as_array().unwrap().len(), 1);
        assert_eq!(on_disk["bookings"][0]["payment"], json!({ "transactionId": "txn_1" }));
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_append_preserves_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        let existing = json!({
            "bookings": [{ "flight": { "id": "F0" }, "payment": { "transactionId": "txn_0" } }],
            "lastUpdated": "yesterday"
        });
        std::fs::write(&path, serde_json::to_string(&existing).unwrap()).unwrap();

        let store = JsonFileStore::new(&path);
        let new_record = record("F1", "txn_1");
        store.append_booking(&new_record).await.unwrap();

        let db = store.read_database().await.unwrap();
        assert_eq!(db["lastUpdated"], json!("yesterday"));
        let bookings = db["bookings"].as_array().unwrap();
        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0], existing["bookings"][0]);
        assert_eq!(bookings.last().unwrap(), &new_record.into_value());
    }

    #[tokio::test]
    async fn test_non_array_bookings_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, r#"{ "bookings": "oops", "version": 2 }"#).unwrap();

        let store = JsonFileStore::new(&path);
        store.append_booking(&record("F1", "txn_1")).await.unwrap();

        let db = store.read_database().await.unwrap();
        assert_eq!(db["bookings"].as_array().unwrap().len(), 1);
        assert_eq!(db["version"], json!(2));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error_and_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.append_booking(&record("F1", "txn_1")).await.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[tokio::test]
    async fn test_concurrent_appends_in_one_process_are_not_lost() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(JsonFileStore::new(dir.path().join("db.json")));

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.append_booking(&record(&format!("F{}", i), &format!("txn_{}", i))).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.list_bookings().await.unwrap().len(), 8);
    }
}
