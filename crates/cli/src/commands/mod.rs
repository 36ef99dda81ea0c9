//! Cart commands

use std::{io, sync::Arc};

use clap::Subcommand;
use tote::{listing::write_cart, storage::FileStorage, store::CartStore};
use tracing::debug;

use crate::{CliError, config::CliConfig};

mod add;
mod adjust;

pub use add::AddArgs;
pub use adjust::ProductArgs;

/// Cart operation.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the cart
    List,

    /// Add a product, or increment it if already in the cart
    Add(AddArgs),

    /// Increment a product's quantity
    Increment(ProductArgs),

    /// Decrement a product's quantity, stopping at zero
    Decrement(ProductArgs),
}

/// Open the configured store, run the command, print the cart and close the store.
pub(crate) async fn run(config: &CliConfig) -> Result<(), CliError> {
    debug!(
        data_dir = %config.storage.data_dir.display(),
        key = %config.storage.storage_key,
        "opening cart store"
    );

    let storage = Arc::new(FileStorage::new(&config.storage.data_dir));
    let store = CartStore::open(storage, config.storage.store_config()).await?;

    let result = execute(&store, &config.command, io::stdout().lock()).await;

    store.close().await;

    result
}

/// Run `command` against an open store, writing its report and the cart to `out`.
pub(crate) async fn execute(
    store: &CartStore,
    command: &Command,
    mut out: impl io::Write,
) -> Result<(), CliError> {
    match command {
        Command::List => {}
        Command::Add(args) => add::run(store, args, &mut out).await?,
        Command::Increment(args) => adjust::increment(store, args, &mut out).await?,
        Command::Decrement(args) => adjust::decrement(store, args, &mut out).await?,
    }

    store.with_cart(|cart| write_cart(&mut out, cart)).await??;

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;
    use tote::{config::CartStoreConfig, storage::MemoryStorage};

    use super::*;

    async fn execute_args(store: &CartStore, args: &[&str]) -> Result<String, CliError> {
        let config = CliConfig::try_parse_from(std::iter::once("tote").chain(args.iter().copied()))
            .map_err(|e| CliError::Output(io::Error::other(e.to_string())))?;

        let mut out = Vec::new();

        execute(store, &config.command, &mut out).await?;

        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    #[tokio::test]
    async fn add_then_list_shows_item() -> TestResult {
        let store =
            CartStore::open(Arc::new(MemoryStorage::new()), CartStoreConfig::default()).await?;

        let output = execute_args(
            &store,
            &["add", "--id", "sku-1", "--title", "Mug", "--price", "4.50"],
        )
        .await?;

        assert!(output.starts_with("Added sku-1"), "unexpected output: {output}");
        assert!(output.contains("Subtotal: 4.50"), "unexpected output: {output}");

        let output = execute_args(
            &store,
            &["add", "--id", "sku-1", "--title", "Mug", "--price", "4.50"],
        )
        .await?;

        assert!(
            output.starts_with("sku-1 already in cart"),
            "unexpected output: {output}"
        );
        assert!(output.contains("Quantity: 2"), "unexpected output: {output}");

        Ok(())
    }

    #[tokio::test]
    async fn adjusting_missing_product_reports_noop() -> TestResult {
        let store =
            CartStore::open(Arc::new(MemoryStorage::new()), CartStoreConfig::default()).await?;

        let output = execute_args(&store, &["increment", "ghost"]).await?;

        assert!(
            output.starts_with("ghost is not in the cart"),
            "unexpected output: {output}"
        );

        let output = execute_args(&store, &["decrement", "ghost"]).await?;

        assert!(
            output.starts_with("ghost is not in the cart or already at zero"),
            "unexpected output: {output}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn closed_store_is_reported() -> TestResult {
        let store =
            CartStore::open(Arc::new(MemoryStorage::new()), CartStoreConfig::default()).await?;

        store.close().await;

        let result = execute_args(&store, &["list"]).await;

        assert!(
            matches!(result, Err(CliError::Store(_))),
            "expected store error, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn run_persists_between_invocations() -> TestResult {
        let dir = tempfile::tempdir()?;
        let data_dir = dir.path().to_string_lossy().into_owned();

        for args in [
            vec!["add", "--id", "a", "--title", "Apple", "--price", "1"],
            vec!["add", "--id", "a", "--title", "Apple", "--price", "1"],
            vec!["decrement", "a"],
        ] {
            let config = CliConfig::try_parse_from(
                ["tote", "--data-dir", data_dir.as_str()]
                    .into_iter()
                    .chain(args),
            )?;

            run(&config).await?;
        }

        let store = CartStore::open(
            Arc::new(FileStorage::new(dir.path())),
            CartStoreConfig::default(),
        )
        .await?;

        let quantities: Vec<u32> = store
            .with_cart(|cart| cart.iter().map(|item| item.quantity).collect())
            .await?;

        assert_eq!(quantities, vec![1]);

        Ok(())
    }
}
