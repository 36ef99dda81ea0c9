//! Storage Config

use std::path::PathBuf;

use clap::Args;
use tote::config::{CartStoreConfig, DEFAULT_STORAGE_KEY};

/// Cart storage settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding the persisted cart
    #[arg(long, env = "TOTE_DATA_DIR", default_value = ".tote", global = true)]
    pub data_dir: PathBuf,

    /// Key of the slot holding the cart snapshot
    #[arg(long, env = "TOTE_STORAGE_KEY", default_value = DEFAULT_STORAGE_KEY, global = true)]
    pub storage_key: String,
}

impl StorageConfig {
    /// Store settings derived from these options.
    #[must_use]
    pub fn store_config(&self) -> CartStoreConfig {
        CartStoreConfig::with_storage_key(self.storage_key.clone())
    }
}
