//! Snapshots
//!
//! A snapshot is the whole cart serialized as a JSON array of line items.

use thiserror::Error;

use crate::cart::Cart;

/// Errors raised while encoding or decoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The cart could not be serialized.
    #[error("failed to encode cart snapshot")]
    Encode(#[source] serde_json::Error),

    /// The stored payload is not a JSON array of line items.
    #[error("failed to decode cart snapshot")]
    Decode(#[source] serde_json::Error),
}

/// Serialize a cart into a snapshot.
///
/// # Errors
///
/// Returns [`SnapshotError::Encode`] if serialization fails.
pub fn encode(cart: &Cart) -> Result<String, SnapshotError> {
    serde_json::to_string(cart).map_err(SnapshotError::Encode)
}

/// Deserialize a snapshot into a cart.
///
/// The payload is trusted as-is beyond what deserialization checks.
///
/// # Errors
///
/// Returns [`SnapshotError::Decode`] if the payload is malformed.
pub fn decode(snapshot: &str) -> Result<Cart, SnapshotError> {
    serde_json::from_str(snapshot).map_err(SnapshotError::Decode)
}
