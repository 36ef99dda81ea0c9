//! Increment and decrement commands

use std::io;

use clap::Args;
use tote::{products::ProductId, store::CartStore};

use crate::CliError;

/// Target product.
#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product identifier
    id: String,
}

pub(super) async fn increment(
    store: &CartStore,
    args: &ProductArgs,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let id = ProductId::from(args.id.as_str());

    if !store.increment(&id).await? {
        writeln!(out, "{id} is not in the cart")?;
    }

    Ok(())
}

pub(super) async fn decrement(
    store: &CartStore,
    args: &ProductArgs,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let id = ProductId::from(args.id.as_str());

    if !store.decrement(&id).await? {
        writeln!(out, "{id} is not in the cart or already at zero")?;
    }

    Ok(())
}
