//! Cart state management.
//!
//! One [`CartManager`] exists per process. It is constructed at the
//! composition root and injected wherever cart access is needed (route
//! handlers, tests) instead of living behind a global accessor. The
//! manager holds the current line sequence in memory, synchronizes with
//! the persistence adapter after every mutation, and notifies subscribers
//! so observers can re-read the aggregates.

pub mod store;
pub mod visitor;

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use rust_decimal::Decimal;
use stockroom_core::{CartLine, Product, ProductId, VisitorId};

pub use store::CartStore;

use crate::storage::KeyValueStore;

/// Handle identifying a registered cart subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Callback = Box<dyn Fn() + Send>;

/// The process-wide shopping cart.
///
/// All operations run synchronously to completion; concurrent callers are
/// serialized by the mutex the composition root wraps this in, so no
/// operation interleaves with another at a finer grain than a full method
/// call.
pub struct CartManager {
    lines: Vec<CartLine>,
    visitor: Option<VisitorId>,
    store: CartStore,
    kv: Arc<dyn KeyValueStore>,
    subscribers: Vec<(SubscriberId, Callback)>,
    next_subscriber: u64,
    initialized: bool,
}

impl CartManager {
    /// Create an empty, uninitialized manager over the given store.
    ///
    /// Mutations are safe to call immediately; they operate on the
    /// in-memory set and are picked up by persistence once [`init`]
    /// resolves the visitor identity.
    ///
    /// [`init`]: CartManager::init
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            lines: Vec::new(),
            visitor: None,
            store: CartStore::new(Arc::clone(&kv)),
            kv,
            subscribers: Vec::new(),
            next_subscriber: 0,
            initialized: false,
        }
    }

    /// Resolve the visitor identity, load the persisted cart, and notify
    /// subscribers once so already-registered observers reconcile.
    ///
    /// Idempotent: the uninitialized to initialized transition happens
    /// exactly once; later calls are no-ops.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        let visitor = visitor::resolve(self.kv.as_ref());
        let loaded = self.store.load(&visitor);
        tracing::debug!(visitor = %visitor, lines = loaded.len(), "cart initialized");
        self.lines = loaded;
        self.visitor = Some(visitor);
        self.notify();
    }

    /// Add one unit of `product`: merged into the existing line for the
    /// same product id, or appended as a new line with quantity 1.
    ///
    /// A line already at `u32::MAX` stays there rather than overflowing.
    pub fn add_item(&mut self, product: Product) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine::new(product));
        }
        self.commit();
    }

    /// Delete the line for `product_id`, if present. Persists and
    /// notifies even when nothing matched.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.lines.retain(|line| &line.product.id != product_id);
        self.commit();
    }

    /// Set the quantity of the line for `product_id` to exactly
    /// `quantity`. Zero removes the line; an unknown id is a no-op.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        let Some(pos) = self
            .lines
            .iter()
            .position(|line| &line.product.id == product_id)
        else {
            return;
        };
        if quantity == 0 {
            self.lines.remove(pos);
        } else if let Some(line) = self.lines.get_mut(pos) {
            line.quantity = quantity;
        }
        self.commit();
    }

    /// Snapshot of the current lines. Mutating the returned value does
    /// not affect manager state.
    #[must_use]
    pub fn items(&self) -> Vec<CartLine> {
        self.lines.clone()
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines. Widened to `u64` so a handful
    /// of large lines cannot overflow the sum.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Empty the cart, persist, and notify.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.commit();
    }

    /// Register a callback invoked after every mutation and once on load
    /// completion. Callbacks run in subscription order.
    pub fn subscribe(&mut self, callback: impl Fn() + Send + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Deregister the callback registered under `id`. Unknown ids are
    /// ignored.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sub, _)| *sub != id);
    }

    /// Persist first, then notify, so observers that re-read after a
    /// restart can never see newer state than storage holds.
    fn commit(&mut self) {
        self.persist();
        self.notify();
    }

    fn persist(&self) {
        if let Some(visitor) = &self.visitor {
            self.store.save(visitor, &self.lines);
        }
    }

    fn notify(&self) {
        for (id, callback) in &self.subscribers {
            // A panicking subscriber must not stop delivery to the rest.
            if catch_unwind(AssertUnwindSafe(|| callback())).is_err() {
                tracing::error!(subscriber = id.0, "cart subscriber panicked");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::storage::{FileStore, NullStore};

    fn product(id: &str, price_cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::new(price_cents, 2),
            image: String::new(),
            category: "tools".to_owned(),
            description: String::new(),
            in_stock: true,
        }
    }

    fn memory_cart() -> CartManager {
        let mut cart = CartManager::new(Arc::new(NullStore));
        cart.init();
        cart
    }

    #[test]
    fn test_repeated_adds_merge_into_one_line() {
        let mut cart = memory_cart();
        for _ in 0..5 {
            cart.add_item(product("1", 1099));
        }

        let items = cart.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().unwrap().quantity, 5);
    }

    #[test]
    fn test_distinct_products_get_distinct_lines() {
        let mut cart = memory_cart();
        cart.add_item(product("1", 1099));
        cart.add_item(product("2", 2599));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_update_quantity_sets_exact_value() {
        let mut cart = memory_cart();
        cart.add_item(product("1", 1099));
        cart.update_quantity(&ProductId::new("1"), 7);

        assert_eq!(cart.item_count(), 7);
    }

    #[test]
    fn test_update_quantity_zero_equals_remove() {
        let mut removed = memory_cart();
        removed.add_item(product("1", 1099));
        removed.remove_item(&ProductId::new("1"));

        let mut zeroed = memory_cart();
        zeroed.add_item(product("1", 1099));
        zeroed.update_quantity(&ProductId::new("1"), 0);

        assert_eq!(removed.items(), zeroed.items());
        assert!(zeroed.items().is_empty());
    }

    #[test]
    fn test_add_item_saturates_at_max_quantity() {
        let mut cart = memory_cart();
        cart.add_item(product("1", 1099));
        cart.update_quantity(&ProductId::new("1"), u32::MAX);
        cart.add_item(product("1", 1099));

        let items = cart.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_item_count_sums_max_quantity_lines_without_overflow() {
        let mut cart = memory_cart();
        cart.add_item(product("1", 1099));
        cart.add_item(product("2", 2599));
        cart.update_quantity(&ProductId::new("1"), u32::MAX);
        cart.update_quantity(&ProductId::new("2"), u32::MAX);

        assert_eq!(cart.item_count(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_update_quantity_unknown_product_is_noop() {
        let mut cart = memory_cart();
        cart.add_item(product("1", 1099));

        let notified = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&notified);
        cart.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        cart.update_quantity(&ProductId::new("missing"), 3);
        assert_eq!(notified.load(Ordering::SeqCst), 0);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_remove_unknown_product_still_notifies() {
        let mut cart = memory_cart();
        let notified = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&notified);
        cart.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        cart.remove_item(&ProductId::new("missing"));
        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_total_matches_recomputation_from_items() {
        let mut cart = memory_cart();
        cart.add_item(product("1", 1099));
        cart.add_item(product("1", 1099));
        cart.add_item(product("2", 2599));
        cart.update_quantity(&ProductId::new("2"), 3);

        let recomputed: Decimal = cart.items().iter().map(CartLine::line_total).sum();
        assert_eq!(cart.total(), recomputed);
        assert_eq!(cart.total(), Decimal::new(9995, 2));
    }

    #[test]
    fn test_items_returns_snapshot() {
        let mut cart = memory_cart();
        cart.add_item(product("1", 1099));

        let mut snapshot = cart.items();
        snapshot.first_mut().unwrap().quantity = 99;
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_clear_empties_and_notifies() {
        let mut cart = memory_cart();
        cart.add_item(product("1", 1099));

        let notified = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&notified);
        cart.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        cart.clear();
        assert!(cart.items().is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribed_callback_receives_nothing_further() {
        let mut cart = memory_cart();
        let first = Arc::new(AtomicU32::new(0));
        let second = Arc::new(AtomicU32::new(0));

        let counter = Arc::clone(&first);
        let id = cart.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&second);
        cart.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        cart.add_item(product("1", 1099));
        cart.unsubscribe(id);
        cart.add_item(product("2", 2599));

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_panicking_subscriber_does_not_block_others() {
        let mut cart = memory_cart();
        cart.subscribe(|| panic!("observer failure"));

        let notified = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&notified);
        cart.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        cart.add_item(product("1", 1099));
        assert_eq!(notified.load(Ordering::SeqCst), 1);
        // The manager itself stays usable.
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_notification_order_follows_subscription_order() {
        let mut cart = memory_cart();
        let order = Arc::new(Mutex::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            cart.subscribe(move || {
                order.lock().unwrap().push(label);
            });
        }

        cart.add_item(product("1", 1099));
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_mutations_before_init_work_in_memory() {
        let mut cart = CartManager::new(Arc::new(NullStore));
        cart.add_item(product("1", 1099));
        assert_eq!(cart.item_count(), 1);

        cart.init();
        // NullStore has nothing persisted, so init replaces the in-memory
        // set with the loaded (empty) one.
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_init_notifies_once_and_is_idempotent() {
        let mut cart = CartManager::new(Arc::new(NullStore));
        let notified = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&notified);
        cart.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        cart.init();
        cart.init();
        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cart_survives_restart_with_durable_store() {
        let dir = tempfile::tempdir().unwrap();
        let kv: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));

        let mut cart = CartManager::new(Arc::clone(&kv));
        cart.init();
        cart.add_item(product("1", 1099));
        cart.add_item(product("2", 2599));
        cart.update_quantity(&ProductId::new("1"), 4);
        let before = cart.items();

        // Simulate a restart: fresh manager over the same store.
        let mut reloaded = CartManager::new(kv);
        reloaded.init();
        assert_eq!(reloaded.items(), before);
        assert_eq!(reloaded.total(), cart.total());
    }
}
