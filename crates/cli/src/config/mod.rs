//! CLI configuration module

use clap::Parser;

use crate::{
    commands::Command,
    config::{logging::LoggingConfig, storage::StorageConfig},
};

pub(crate) mod logging;
pub(crate) mod storage;

/// Tote cart CLI configuration
#[derive(Debug, Parser)]
#[command(name = "tote", about = "Storefront cart on the local device", long_about = None)]
pub struct CliConfig {
    /// Cart storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Cart operation to run.
    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
