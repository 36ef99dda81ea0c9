//! Store configuration

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "@goMarketPlace:products";

/// Cart store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartStoreConfig {
    /// Key of the slot holding the cart snapshot.
    pub storage_key: String,
}

impl CartStoreConfig {
    /// Settings using the given storage key.
    pub fn with_storage_key(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
        }
    }
}

impl Default for CartStoreConfig {
    fn default() -> Self {
        Self::with_storage_key(DEFAULT_STORAGE_KEY)
    }
}
