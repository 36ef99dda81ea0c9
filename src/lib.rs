//! Tote
//!
//! Tote keeps a storefront shopping cart in memory and mirrors every change to
//! a key-value slot on the device.

pub mod cart;
pub mod config;
pub mod items;
pub mod listing;
pub mod prelude;
pub mod products;
pub mod snapshot;
pub mod storage;
pub mod store;
pub mod writer;
