//! Cart persistence adapter.
//!
//! Serializes the cart line sequence as JSON under a key derived from the
//! visitor identifier. Load failures (absent or corrupt data) yield an
//! empty cart; save failures are logged and swallowed, since the
//! in-memory cart stays correct either way.

use std::sync::Arc;

use stockroom_core::{CartLine, VisitorId};

use crate::storage::KeyValueStore;

/// Prefix of the cart storage key; the full key is `cart_<visitor id>`,
/// isolating visitors that share a storage origin.
const CART_KEY_PREFIX: &str = "cart_";

/// Reads and writes the serialized cart for a visitor.
#[derive(Clone)]
pub struct CartStore {
    kv: Arc<dyn KeyValueStore>,
}

impl CartStore {
    /// Create an adapter over the given key-value store.
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    fn key(visitor: &VisitorId) -> String {
        format!("{CART_KEY_PREFIX}{visitor}")
    }

    /// Load the persisted cart lines for `visitor`.
    ///
    /// Absent or undecodable data yields an empty cart; corrupt records
    /// are logged, never propagated.
    #[must_use]
    pub fn load(&self, visitor: &VisitorId) -> Vec<CartLine> {
        let Some(raw) = self.kv.get(&Self::key(visitor)) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!(visitor = %visitor, error = %e, "discarding corrupt cart record");
                Vec::new()
            }
        }
    }

    /// Persist `lines` for `visitor`. Failures are logged and swallowed.
    pub fn save(&self, visitor: &VisitorId, lines: &[CartLine]) {
        let raw = match serde_json::to_string(lines) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(visitor = %visitor, error = %e, "failed to serialize cart");
                return;
            }
        };
        if let Err(e) = self.kv.put(&Self::key(visitor), &raw) {
            tracing::warn!(visitor = %visitor, error = %e, "failed to persist cart");
        }
    }
}
