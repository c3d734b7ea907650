//! Catalog entry types.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of a catalog product.
///
/// Catalog identifiers are opaque strings assigned at build time. The
/// newtype prevents mixing product identifiers with other string values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product identifier from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An immutable catalog entry.
///
/// Products are created from the static catalog at startup and never
/// mutated at runtime. They travel inside cart lines and order
/// submissions, so the full record is serializable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the store currency. Non-negative.
    pub price: Decimal,
    pub image: String,
    pub category: String,
    pub description: String,
    pub in_stock: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: ProductId::new("1"),
            name: "Digital Thermometer".to_owned(),
            price: Decimal::new(2599, 2),
            image: "/images/thermometer.jpg".to_owned(),
            category: "medical".to_owned(),
            description: "Professional digital thermometer".to_owned(),
            in_stock: true,
        }
    }

    #[test]
    fn test_product_id_transparent_serde() {
        let id = ProductId::new("abc-123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc-123\"");
        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_product_serde_roundtrip() {
        let product = sample();
        let json = serde_json::to_string(&product).unwrap();
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn test_product_price_accepts_number_json() {
        // Clients send prices as JSON numbers; Decimal must accept both forms.
        let json = r#"{
            "id": "2",
            "name": "Blood Pressure Monitor",
            "price": 89.99,
            "image": "/images/bp.jpg",
            "category": "medical",
            "description": "Automatic monitor",
            "in_stock": true
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price.to_string(), "89.99");
    }
}
