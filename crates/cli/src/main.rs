//! Tote CLI
//!
//! Owns a cart store for the lifetime of one command.

use std::{io, process};

use thiserror::Error;

use tote::{listing::ListingError, store::CartStoreError};

use crate::config::CliConfig;

mod commands;
mod config;
mod logging;

/// Errors surfaced to the user by a command.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Store(#[from] CartStoreError),

    #[error(transparent)]
    Listing(#[from] ListingError),

    #[error("failed to write output")]
    Output(#[from] io::Error),
}

#[tokio::main]
async fn main() {
    let config = CliConfig::load().unwrap_or_else(|e| e.exit());

    if let Err(e) = logging::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("failed to initialise logging: {e}");
        }
    }

    if let Err(cli_error) = commands::run(&config).await {
        #[expect(
            clippy::print_stderr,
            reason = "user-facing error message, logs may be filtered out"
        )]
        {
            eprintln!("error: {cli_error}");
        }

        process::exit(1);
    }
}
