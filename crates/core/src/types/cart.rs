//! Cart line type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::Product;

/// A (product, quantity) pair within a cart.
///
/// Invariant: `quantity >= 1`. The cart manager removes a line rather than
/// storing a zero quantity, and merges additions of the same product into
/// one line instead of duplicating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Create a line with quantity 1 for a freshly added product.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}
