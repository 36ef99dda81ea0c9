//! In-memory storage

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::Mutex;

use super::{CartStorage, StorageError};

/// Storage backed by a process-local map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<FxHashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a single record.
    pub fn with_record(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut records = FxHashMap::default();

        records.insert(key.into(), value.into());

        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl CartStorage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records.lock().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.records.lock().await.insert(key.to_string(), value);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn read_missing_key_is_none() -> TestResult {
        let storage = MemoryStorage::new();

        assert_eq!(storage.read("@cart").await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn write_overwrites_previous_value() -> TestResult {
        let storage = MemoryStorage::with_record("@cart", "[]");

        storage.write("@cart", "[1]".to_string()).await?;

        assert_eq!(storage.read("@cart").await?.as_deref(), Some("[1]"));

        Ok(())
    }
}
