//! Key-value blob stores.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tempfile::NamedTempFile;

use super::StorageError;

/// Opaque byte storage addressed by key
pub trait BlobStore: Send + Sync {
    /// Read the blob under `key`, `None` if nothing was ever stored
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the blob under `key`
    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

/// Bytes escaped in file names. `%` is included so distinct keys never share
/// a file.
const KEY_ENCODE_SET: &AsciiSet = &CONTROLS.add(b'%').add(b'/').add(b'\\').add(b':');

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing `key`; path separators are percent-encoded
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name = utf8_percent_encode(key, KEY_ENCODE_SET);
        self.dir.join(format!("{}.json", name))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(&path)?))
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        // Write beside the target, then rename over it
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;

        Ok(())
    }
}

/// In-process store, mostly for tests
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(blobs.get(key).cloned())
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let mut blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
        blobs.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}
