//! Listing
//!
//! Renders a cart as a console table followed by its totals.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, SubtotalError},
    items::LineItem,
};

/// Errors that can occur when writing a listing.
#[derive(Debug, Error)]
pub enum ListingError {
    /// The subtotal could not be computed.
    #[error(transparent)]
    Subtotal(#[from] SubtotalError),

    /// Writing to the output failed.
    #[error("failed to write listing")]
    Io(#[from] io::Error),
}

/// Write `cart` to `out` as a table plus quantity and subtotal lines.
///
/// # Errors
///
/// - [`ListingError::Subtotal`]: the subtotal overflowed.
/// - [`ListingError::Io`]: writing to `out` failed.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> Result<(), ListingError> {
    if cart.is_empty() {
        writeln!(out, "Cart is empty")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Id", "Title", "Price", "Qty", "Line Total"]);

    for (idx, item) in cart.iter().enumerate() {
        builder.push_record(item_row(idx, item));
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, " Quantity: {}", cart.total_quantity())?;
    writeln!(out, " Subtotal: {}", cart.subtotal()?)?;

    Ok(())
}

fn item_row(idx: usize, item: &LineItem) -> [String; 6] {
    let line_total = item
        .line_total()
        .map_or_else(|| "overflow".to_string(), |total| total.to_string());

    [
        format!("#{}", idx + 1),
        item.id.to_string(),
        item.title.clone(),
        item.price.to_string(),
        item.quantity.to_string(),
        line_total,
    ]
}
