//! Tote prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Added, Cart, SubtotalError},
    config::{CartStoreConfig, DEFAULT_STORAGE_KEY},
    items::{LineItem, NewLineItem},
    listing::{ListingError, write_cart},
    products::ProductId,
    snapshot::SnapshotError,
    storage::{CartStorage, FileStorage, MemoryStorage, StorageError},
    store::{CartStore, CartStoreError, CartSummary},
};
