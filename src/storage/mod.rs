//! Persistence for the reminder collection.
//!
//! The repository sees storage as an opaque key-value blob store. One blob,
//! keyed by the configured storage key, holds the whole collection:
//!
//! ```text
//! ~/.echoremind/
//! └── reminders-storage.json    # { "reminders": [ ... ] }
//! ```

pub mod blob;
pub mod snapshot;

use thiserror::Error;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use snapshot::PersistedState;

/// Errors that can occur reading or writing persisted state
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
