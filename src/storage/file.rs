//! JSON file key-value store.
//!
//! All keys live in one JSON object. Each mutation rewrites the file through
//! a temporary sibling that is renamed into place, so a crash never leaves a
//! half-written file behind.

// ============================================================================
// Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::KeyValueStore;

// ============================================================================
// FileStore
// ============================================================================

/// Key-value store persisted to a JSON file.
#[derive(Debug)]
pub struct FileStore {
    /// Path of the JSON file.
    path: PathBuf,

    /// In-memory copy of the file contents.
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens a store, reading existing contents.
    ///
    /// A missing file yields an empty store. A file that is not a JSON
    /// object of strings is discarded with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file exists but cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let values = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(values) => values,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Discarding unreadable store");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(Error::Io(e)),
        };

        debug!(path = %path.display(), keys = values.len(), "File store opened");
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    /// Returns the backing file path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `values` to disk atomically.
    fn flush(&self, values: &BTreeMap<String, String>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let json = serde_json::to_vec_pretty(values)?;
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(&json)?;
        temp.flush()?;
        temp.persist(&self.path)
            .map_err(|e| Error::storage(format!("persist {}: {}", self.path.display(), e)))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock();
        values.insert(key.to_string(), value.to_string());
        self.flush(&values)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock();
        if values.remove(key).is_some() {
            self.flush(&values)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
