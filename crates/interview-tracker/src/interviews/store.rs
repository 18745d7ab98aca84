use super::codec::{read_collection, to_csv_string};
use super::collection::RecordCollection;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// Persistence for the whole interview table.
///
/// Every save replaces the stored table in full; nothing is appended.
pub trait RecordStore: Send + Sync {
    fn load(&self) -> Result<RecordCollection, StoreError>;
    fn save(&self, collection: &RecordCollection) -> Result<(), StoreError>;

    /// Persists an empty table and returns it.
    fn clear(&self) -> Result<RecordCollection, StoreError> {
        let empty = RecordCollection::new();
        self.save(&empty)?;
        Ok(empty)
    }
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access interview data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid interview data: {0}")]
    Csv(#[from] csv::Error),
    #[error("unexpected interview data columns: {}", found.join(", "))]
    Schema { found: Vec<String> },
    #[error("interview store unavailable: {0}")]
    Unavailable(String),
}

/// Flat-file store backed by a single CSV file.
#[derive(Debug, Clone)]
pub struct CsvRecordStore {
    path: PathBuf,
}

impl CsvRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for CsvRecordStore {
    fn load(&self) -> Result<RecordCollection, StoreError> {
        let file = match std::fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no interview data yet, starting empty");
                return Ok(RecordCollection::new());
            }
            Err(err) => return Err(err.into()),
        };

        let collection = read_collection(file)?;
        debug!(path = %self.path.display(), rows = collection.len(), "loaded interview data");
        Ok(collection)
    }

    fn save(&self, collection: &RecordCollection) -> Result<(), StoreError> {
        let text = to_csv_string(collection)?;
        std::fs::write(&self.path, text)?;
        debug!(path = %self.path.display(), rows = collection.len(), "saved interview data");
        Ok(())
    }
}

/// Store that keeps the serialized table in memory.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    contents: Mutex<Option<String>>,
}

impl MemoryRecordStore {
    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(text.into())),
        }
    }

    /// Serialized text from the last save, if any.
    pub fn contents(&self) -> Result<Option<String>, StoreError> {
        Ok(self.guard()?.clone())
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, StoreError> {
        self.contents
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self) -> Result<RecordCollection, StoreError> {
        match self.guard()?.as_deref() {
            Some(text) => read_collection(text.as_bytes()),
            None => Ok(RecordCollection::new()),
        }
    }

    fn save(&self, collection: &RecordCollection) -> Result<(), StoreError> {
        let text = to_csv_string(collection)?;
        *self.guard()? = Some(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interviews::collection::COLUMNS;

    #[test]
    fn missing_file_loads_as_empty_table() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = CsvRecordStore::new(dir.path().join("interview_data.csv"));
        let collection = store.load().expect("missing file is not an error");
        assert!(collection.is_empty());
        assert!(!store.path().exists(), "load must not create the file");
    }

    #[test]
    fn clear_writes_header_only_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = CsvRecordStore::new(dir.path().join("interview_data.csv"));

        let cleared = store.clear().expect("clear succeeds");
        assert!(cleared.is_empty());

        let text = std::fs::read_to_string(store.path()).expect("file written");
        assert_eq!(text, format!("{}\n", COLUMNS.join(",")));
    }

    #[test]
    fn directory_path_surfaces_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = CsvRecordStore::new(dir.path());
        assert!(matches!(store.save(&RecordCollection::new()), Err(StoreError::Io(_))));
    }

    #[test]
    fn memory_store_reports_malformed_contents() {
        let store = MemoryRecordStore::with_contents("Name\nAsha\n");
        assert!(matches!(store.load(), Err(StoreError::Schema { .. })));
    }
}
