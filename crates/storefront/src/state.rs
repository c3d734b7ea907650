//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cart::CartManager;
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::services::Notifier;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The cart manager sits behind a mutex so
/// concurrent callers serialize on full method calls; everything else is
/// read-only after construction.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: Mutex<CartManager>,
    notifier: Notifier,
}

impl AppState {
    /// Create a new application state from the composition root's parts.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Catalog,
        cart: CartManager,
        notifier: Notifier,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(cart),
                notifier,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Lock and return the cart manager.
    ///
    /// Subscriber panics are caught inside the manager, so a poisoned
    /// lock can only come from a panic elsewhere while holding the guard;
    /// the cart data itself is still consistent, so recover it.
    pub fn cart(&self) -> MutexGuard<'_, CartManager> {
        self.inner
            .cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a reference to the notification dispatcher.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }
}
