//! Items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::ProductId;

/// A product entry in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier
    pub id: ProductId,

    /// Product title
    pub title: String,

    /// Product image URL
    pub image_url: String,

    /// Unit price
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,

    /// Number of units in the cart
    pub quantity: u32,
}

impl LineItem {
    /// Creates a line item from a candidate with a quantity of one.
    pub fn from_new(item: NewLineItem) -> Self {
        let NewLineItem {
            id,
            title,
            image_url,
            price,
        } = item;

        Self {
            id,
            title,
            image_url,
            price,
            quantity: 1,
        }
    }

    /// Returns `price * quantity`, or `None` if the multiplication overflows.
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Candidate line item, as offered by a product listing.
///
/// Any `quantity` field in serialized input is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLineItem {
    /// Product identifier
    pub id: ProductId,

    /// Product title
    pub title: String,

    /// Product image URL
    pub image_url: String,

    /// Unit price
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
}

impl NewLineItem {
    /// Creates a new candidate line item.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }
}
