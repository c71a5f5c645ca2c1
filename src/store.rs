//! Storage boundary: a single JSON blob under one fixed key.

use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::warn;

use crate::codec;
use crate::state::AppState;

/// Storage key from the original widget, used as the state file stem.
pub const STORAGE_KEY: &str = "focusTodoData";

/// Errors reading or writing the state blob.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Key-value blob storage holding the whole state.
pub trait BlobStore {
    /// The stored blob, or `None` when nothing has been saved yet.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replace the stored blob.
    fn write(&self, blob: &str) -> Result<(), StoreError>;

    /// Move an undecodable blob out of the way. Default: nothing to keep.
    fn quarantine(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Load the state, defaulting anything missing. `today` fills a missing
/// current date.
pub fn load<S: BlobStore + ?Sized>(store: &S, today: &str) -> Result<AppState, StoreError> {
    let Some(blob) = store.read()? else {
        return Ok(AppState::new(today));
    };

    match codec::decode(&blob, today) {
        Some(state) => Ok(state),
        None => {
            warn!("stored state is unreadable, starting from defaults");
            if let Err(e) = store.quarantine() {
                warn!("failed to set unreadable state aside: {}", e);
            }
            Ok(AppState::new(today))
        }
    }
}

/// Serialize and write the full state.
pub fn save<S: BlobStore + ?Sized>(store: &S, state: &AppState) -> Result<(), StoreError> {
    let blob = codec::encode(state)?;
    store.write(&blob)
}

/// State kept in one JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(STORAGE_KEY);
        self.path.with_file_name(format!(".{}.tmp", name))
    }
}

impl BlobStore for FileStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write(&self, blob: &str) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let tmp = self.temp_path();
        fs::write(&tmp, blob).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)
    }

    fn quarantine(&self) -> Result<(), StoreError> {
        let timestamp = Local::now().format("%Y%m%d-%H%M%S");
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(STORAGE_KEY);
        let aside = self
            .path
            .with_file_name(format!("{}.corrupt-{}", name, timestamp));
        fs::rename(&self.path, &aside).map_err(|source| StoreError::Write {
            path: aside.clone(),
            source,
        })?;
        warn!("unreadable state moved to {}", aside.display());
        Ok(())
    }
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: RefCell<Option<String>>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds a blob.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        let store = Self::default();
        *store.blob.borrow_mut() = Some(blob.into());
        store
    }

    /// Make subsequent writes fail, as a full disk would.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// The current blob.
    pub fn blob(&self) -> Option<String> {
        self.blob.borrow().clone()
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl BlobStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.blob.borrow().clone())
    }

    fn write(&self, blob: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Unavailable("quota exceeded".to_string()));
        }
        *self.blob.borrow_mut() = Some(blob.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn quarantine(&self) -> Result<(), StoreError> {
        self.blob.borrow_mut().take();
        Ok(())
    }
}

impl<S: BlobStore + ?Sized> BlobStore for &S {
    fn read(&self) -> Result<Option<String>, StoreError> {
        (**self).read()
    }

    fn write(&self, blob: &str) -> Result<(), StoreError> {
        (**self).write(blob)
    }

    fn quarantine(&self) -> Result<(), StoreError> {
        (**self).quarantine()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::{SlotAddr, Tier};
    use tempfile::TempDir;

    const TODAY: &str = "Mon Oct 19 2026";

    #[test]
    fn test_load_absent_gives_first_run_state() {
        let store = MemoryStore::new();
        assert_eq!(load(&store, TODAY).unwrap(), AppState::new(TODAY));
    }

    #[test]
    fn test_file_store_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("nested").join("state.json"));

        let mut state = AppState::new(TODAY);
        state.set_text(SlotAddr::major(Tier::Main), "Write tests");
        save(&store, &state).unwrap();

        assert!(store.path().exists());
        assert!(!store.temp_path().exists());
        assert_eq!(load(&store, "Tue Oct 20 2026").unwrap(), state);
    }

    #[test]
    fn test_file_store_missing_file_reads_none() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("state.json"));
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_file_store_quarantines_unreadable_blob() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state.json");
        fs::write(&path, "{{{ definitely not json").unwrap();
        let store = FileStore::new(&path);

        let state = load(&store, TODAY).unwrap();
        assert_eq!(state, AppState::new(TODAY));
        assert!(!path.exists());

        let kept: Vec<String> = fs::read_dir(tmp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(kept.len(), 1);
        assert!(kept[0].starts_with("state.json.corrupt-"));
    }

    #[test]
    fn test_file_store_read_error_surfaces() {
        let tmp = TempDir::new().unwrap();
        // A directory where the file should be cannot be read as a string.
        let store = FileStore::new(tmp.path());
        assert!(matches!(store.read(), Err(StoreError::Read { .. })));
    }

    #[test]
    fn test_memory_store_failed_write_is_reported() {
        let store = MemoryStore::new();
        store.fail_writes(true);
        let err = save(&store, &AppState::new(TODAY)).unwrap_err();
        assert!(err.to_string().contains("quota"));
        assert_eq!(store.blob(), None);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_memory_store_partial_blob_is_defaulted() {
        let store = MemoryStore::with_blob(r#"{"streak": 5}"#);
        let state = load(&store, TODAY).unwrap();
        assert_eq!(state.streak, 5);
        assert_eq!(state.current_date, TODAY);
    }
}
