//! Visitor identity resolution.
//!
//! Each installation gets one durable anonymous identifier; the cart
//! storage key is derived from it. If the identifier cannot be persisted
//! the resolver still returns a fresh one, so the rest of the system
//! keeps functioning and the cart simply will not survive a restart.

use stockroom_core::VisitorId;

use crate::storage::KeyValueStore;

/// Well-known storage key for the visitor identifier.
pub const VISITOR_KEY: &str = "visitor_id";

/// Return the stored visitor identifier, creating and persisting one on
/// first use.
pub fn resolve(store: &dyn KeyValueStore) -> VisitorId {
    if let Some(stored) = store.get(VISITOR_KEY) {
        let trimmed = stored.trim();
        if !trimmed.is_empty() {
            return VisitorId::from_stored(trimmed);
        }
    }

    let id = VisitorId::generate();
    if let Err(e) = store.put(VISITOR_KEY, id.as_str()) {
        tracing::warn!(error = %e, "failed to persist visitor id; cart will not survive a restart");
    }
    id
}
