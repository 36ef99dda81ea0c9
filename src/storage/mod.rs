//! Key-value storage for cart snapshots.

use std::io;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading the record under a key failed.
    #[error("failed to read `{key}`")]
    Read {
        /// Storage key
        key: String,

        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Writing the record under a key failed.
    #[error("failed to write `{key}`")]
    Write {
        /// Storage key
        key: String,

        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Key-value slot store holding serialized snapshots.
#[automock]
#[async_trait]
pub trait CartStorage: Send + Sync {
    /// Read the record stored under `key`, if any.
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the record stored under `key`.
    async fn write(&self, key: &str, value: String) -> Result<(), StorageError>;
}
