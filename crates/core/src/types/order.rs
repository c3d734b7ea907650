//! Order submission types.

use core::fmt;

use chrono::{DateTime, Utc};
use rand::{Rng, distr::Alphanumeric};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartLine;

/// Length of the random suffix appended to generated order identifiers.
const SUFFIX_LENGTH: usize = 6;

/// A generated order identifier.
///
/// Combines the submission timestamp with a short random alphanumeric
/// suffix, uppercased. The identifier has no meaning beyond correlating
/// an accepted order with its notification email.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Generate a fresh order identifier.
    #[must_use]
    pub fn generate() -> Self {
        let suffix: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(SUFFIX_LENGTH)
            .map(char::from)
            .collect();
        Self(format!("{}-{}", Utc::now().timestamp_millis(), suffix).to_uppercase())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An order submission request as received from the checkout page.
///
/// Carries the buyer-entered contact fields plus a snapshot of the cart
/// lines and total at submission time. Created once per checkout attempt
/// and consumed by the order validator; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub items: Vec<CartLine>,
    pub total: Decimal,
}

impl OrderForm {
    /// Total number of units across all lines. Widened to `u64` so large
    /// per-line quantities cannot overflow the sum.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

/// A validated order: the submitted form plus a generated identifier and
/// a server-assigned timestamp.
///
/// Orders exist only for the duration of the notification attempt; they
/// are not persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub form: OrderForm,
    pub submitted_at: DateTime<Utc>,
}

impl Order {
    /// Stamp a validated form with a fresh identifier and the current time.
    #[must_use]
    pub fn accept(form: OrderForm) -> Self {
        Self {
            id: OrderId::generate(),
            form,
            submitted_at: Utc::now(),
        }
    }
}
