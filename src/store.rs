//! Cart store
//!
//! In-memory cart mirrored to a key-value slot. Every mutation enqueues the
//! full snapshot on a [`SnapshotWriter`]; callers never wait on persistence.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, error, info};

use crate::{
    cart::{Added, Cart, SubtotalError},
    config::CartStoreConfig,
    items::{LineItem, NewLineItem},
    products::ProductId,
    snapshot::{self, SnapshotError},
    storage::{CartStorage, StorageError},
    writer::SnapshotWriter,
};

/// Errors returned by [`CartStore`].
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The store was used after it was closed.
    #[error("cart store used outside of an active store context")]
    Inactive,

    /// The stored snapshot could not be read.
    #[error("failed to read stored cart")]
    Storage(#[from] StorageError),

    /// The stored snapshot could not be decoded.
    #[error("stored cart is malformed")]
    Snapshot(#[from] SnapshotError),

    /// The cart subtotal could not be computed.
    #[error(transparent)]
    Subtotal(#[from] SubtotalError),
}

/// Aggregates over the current cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    /// Number of distinct products
    pub items: usize,

    /// Sum of quantities
    pub quantity: u64,

    /// Sum of `price * quantity`
    pub subtotal: Decimal,
}

#[derive(Debug)]
struct State {
    cart: Cart,
    active: bool,
}

/// Cart store owned by the application root and shared by reference.
pub struct CartStore {
    storage: Arc<dyn CartStorage>,
    config: CartStoreConfig,
    state: RwLock<State>,
    writer: SnapshotWriter,
}

impl CartStore {
    /// Open a store and load the persisted cart before returning.
    ///
    /// Must be called within a Tokio runtime; the snapshot writer is spawned on it.
    ///
    /// # Errors
    ///
    /// - [`CartStoreError::Storage`]: the stored record could not be read.
    /// - [`CartStoreError::Snapshot`]: the stored record is malformed.
    pub async fn open(
        storage: Arc<dyn CartStorage>,
        config: CartStoreConfig,
    ) -> Result<Self, CartStoreError> {
        let writer = SnapshotWriter::spawn(Arc::clone(&storage), config.storage_key.clone());

        let store = Self {
            storage,
            config,
            state: RwLock::new(State {
                cart: Cart::new(),
                active: true,
            }),
            writer,
        };

        store.load().await?;

        Ok(store)
    }

    /// Replace the in-memory cart with the persisted snapshot.
    ///
    /// A missing record loads an empty cart. Snapshots still queued on the
    /// writer are written before the record is read, and the cart lock is
    /// held throughout, so no older snapshot can land after the load.
    ///
    /// # Errors
    ///
    /// - [`CartStoreError::Inactive`]: the store has been closed.
    /// - [`CartStoreError::Storage`]: the stored record could not be read.
    /// - [`CartStoreError::Snapshot`]: the stored record is malformed.
    pub async fn load(&self) -> Result<(), CartStoreError> {
        let key = &self.config.storage_key;
        let mut state = self.active_mut().await?;

        self.writer.flush().await;

        let cart = match self.storage.read(key).await? {
            Some(stored) => snapshot::decode(&stored)?,
            None => Cart::new(),
        };

        info!(key = %key, items = cart.len(), "loaded cart");

        state.cart = cart;

        Ok(())
    }

    /// Add a product, or increment it if it is already in the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Inactive`] if the store has been closed.
    pub async fn add_to_cart(&self, item: NewLineItem) -> Result<Added, CartStoreError> {
        let mut state = self.active_mut().await?;

        let product = item.id.clone();
        let added = state.cart.add(item);

        debug!(%product, ?added, "added product to cart");

        self.persist(&state.cart);

        Ok(added)
    }

    /// Increment a product's quantity. Returns `false` if it is not in the cart.
    ///
    /// The snapshot is persisted either way.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Inactive`] if the store has been closed.
    pub async fn increment(&self, id: &ProductId) -> Result<bool, CartStoreError> {
        let mut state = self.active_mut().await?;

        let changed = state.cart.increment(id);

        debug!(product = %id, changed, "incremented product");

        self.persist(&state.cart);

        Ok(changed)
    }

    /// Decrement a product's quantity, stopping at zero. Returns `false` if
    /// nothing changed.
    ///
    /// The snapshot is persisted either way.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Inactive`] if the store has been closed.
    pub async fn decrement(&self, id: &ProductId) -> Result<bool, CartStoreError> {
        let mut state = self.active_mut().await?;

        let changed = state.cart.decrement(id);

        debug!(product = %id, changed, "decremented product");

        self.persist(&state.cart);

        Ok(changed)
    }

    /// Current line items in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Inactive`] if the store has been closed.
    pub async fn products(&self) -> Result<Vec<LineItem>, CartStoreError> {
        self.with_cart(|cart| cart.items().to_vec()).await
    }

    /// Run `f` against the current cart without copying it.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Inactive`] if the store has been closed.
    pub async fn with_cart<R>(&self, f: impl FnOnce(&Cart) -> R) -> Result<R, CartStoreError> {
        let state = self.active().await?;

        Ok(f(&state.cart))
    }

    /// Item count, total quantity and subtotal of the current cart.
    ///
    /// # Errors
    ///
    /// - [`CartStoreError::Inactive`]: the store has been closed.
    /// - [`CartStoreError::Subtotal`]: the subtotal overflowed.
    pub async fn summary(&self) -> Result<CartSummary, CartStoreError> {
        let state = self.active().await?;

        Ok(CartSummary {
            items: state.cart.len(),
            quantity: state.cart.total_quantity(),
            subtotal: state.cart.subtotal()?,
        })
    }

    /// Wait for every snapshot enqueued so far to be handled.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    /// Deactivate the store, flush outstanding snapshots and stop the writer.
    ///
    /// Later calls to read or mutate return [`CartStoreError::Inactive`].
    pub async fn close(&self) {
        {
            let mut state = self.state.write().await;

            if !state.active {
                return;
            }

            state.active = false;
        }

        self.writer.shutdown().await;

        debug!(key = %self.config.storage_key, "closed cart store");
    }

    /// Number of snapshot writes that failed.
    pub fn failed_writes(&self) -> u64 {
        self.writer.failed_writes()
    }

    /// Store settings.
    pub fn config(&self) -> &CartStoreConfig {
        &self.config
    }

    async fn active(&self) -> Result<RwLockReadGuard<'_, State>, CartStoreError> {
        let state = self.state.read().await;

        if state.active {
            Ok(state)
        } else {
            Err(CartStoreError::Inactive)
        }
    }

    async fn active_mut(&self) -> Result<RwLockWriteGuard<'_, State>, CartStoreError> {
        let state = self.state.write().await;

        if state.active {
            Ok(state)
        } else {
            Err(CartStoreError::Inactive)
        }
    }

    // Called with the state lock held so enqueue order matches mutation order.
    fn persist(&self, cart: &Cart) {
        match snapshot::encode(cart) {
            Ok(encoded) => self.writer.enqueue(encoded),
            Err(encode_error) => {
                error!(error = %encode_error, "failed to encode cart snapshot");
            }
        }
    }
}

impl Debug for CartStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartStore")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("writer", &self.writer)
            .finish_non_exhaustive()
    }
}
