//! Add command

use std::io;

use clap::Args;
use rust_decimal::Decimal;
use tote::{cart::Added, items::NewLineItem, store::CartStore};

use crate::CliError;

/// Candidate product to add.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Product identifier
    #[arg(long)]
    id: String,

    /// Product title
    #[arg(long)]
    title: String,

    /// Product image URL
    #[arg(long, default_value = "")]
    image_url: String,

    /// Unit price
    #[arg(long)]
    price: Decimal,
}

pub(super) async fn run(
    store: &CartStore,
    args: &AddArgs,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let item = NewLineItem::new(
        args.id.as_str(),
        args.title.as_str(),
        args.image_url.as_str(),
        args.price,
    );

    let message = match store.add_to_cart(item).await? {
        Added::Appended => format!("Added {}", args.id),
        Added::Incremented => format!("{} already in cart, quantity increased", args.id),
    };

    writeln!(out, "{message}")?;

    Ok(())
}
