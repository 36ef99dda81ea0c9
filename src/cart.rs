//! Cart

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    items::{LineItem, NewLineItem},
    products::ProductId,
};

/// Errors raised while totalling a cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubtotalError {
    /// A line total or the running sum exceeded the decimal range (product id).
    #[error("subtotal overflowed at item {0}")]
    Overflow(ProductId),
}

/// How [`Cart::add`] applied a candidate item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Added {
    /// The product was new and was appended with a quantity of one.
    Appended,

    /// The product was already present and its quantity was incremented.
    Incremented,
}

/// Ordered collection of line items, unique by product id.
///
/// Items keep the order in which they were first added. Entries are never
/// removed; decrementing stops at a quantity of zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart from already materialised line items, keeping their order.
    pub fn with_items(items: impl Into<Vec<LineItem>>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// Add a candidate item.
    ///
    /// A product already in the cart is incremented and keeps its stored
    /// details; otherwise the candidate is appended with a quantity of one.
    pub fn add(&mut self, item: NewLineItem) -> Added {
        if self.increment(&item.id) {
            return Added::Incremented;
        }

        self.items.push(LineItem::from_new(item));

        Added::Appended
    }

    /// Increment the quantity of a product. Returns `false` if it is absent.
    pub fn increment(&mut self, id: &ProductId) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.quantity = item.quantity.saturating_add(1);

                true
            }
            None => false,
        }
    }

    /// Decrement the quantity of a product.
    ///
    /// Returns `false`, leaving the cart untouched, if the product is absent
    /// or already at zero.
    pub fn decrement(&mut self, id: &ProductId) -> bool {
        match self.get_mut(id) {
            Some(item) if item.quantity >= 1 => {
                item.quantity -= 1;

                true
            }
            _ => false,
        }
    }

    /// Get a line item by product id.
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    fn get_mut(&mut self, id: &ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Iterate over the line items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consume the cart, returning its line items.
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all line items.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `price * quantity` across all line items.
    ///
    /// # Errors
    ///
    /// Returns [`SubtotalError::Overflow`] if the total leaves the decimal range.
    pub fn subtotal(&self) -> Result<Decimal, SubtotalError> {
        self.items.iter().try_fold(Decimal::ZERO, |acc, item| {
            item.line_total()
                .and_then(|line| acc.checked_add(line))
                .ok_or_else(|| SubtotalError::Overflow(item.id.clone()))
        })
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        Self::with_items(items)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
