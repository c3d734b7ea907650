//! Static product catalog.
//!
//! Catalog entries are fixed at build time and never mutated at runtime;
//! the catalog is built once at startup and shared read-only through the
//! application state.

use rust_decimal::Decimal;
use serde::Serialize;
use stockroom_core::{Product, ProductId};

/// A product category for navigation.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub slug: String,
    pub name: String,
    pub icon: String,
}

/// The read-only product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Build the built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let products = vec![
            entry(
                "1",
                "Digital Thermometer",
                2599,
                "medical",
                "Professional digital thermometer with fast readings",
            ),
            entry(
                "2",
                "Blood Pressure Monitor",
                8999,
                "medical",
                "Automatic blood pressure monitor with large display",
            ),
            entry(
                "3",
                "Adjustable Wrench Set",
                3499,
                "tools",
                "Professional grade adjustable wrench set",
            ),
            entry(
                "4",
                "Drill Bit Set",
                1999,
                "tools",
                "Complete drill bit set for various materials",
            ),
            entry(
                "5",
                "Safety Goggles",
                1299,
                "equipment",
                "Professional safety goggles with anti-fog coating",
            ),
            entry(
                "6",
                "Work Gloves",
                899,
                "equipment",
                "Durable work gloves with grip enhancement",
            ),
        ];
        let categories = vec![
            category("medical", "Medical Supplies", "\u{1f3e5}"),
            category("tools", "Tools", "\u{1f527}"),
            category("equipment", "Equipment", "\u{2699}\u{fe0f}"),
        ];
        Self {
            products,
            categories,
        }
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by identifier.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// All products tagged with the given category slug.
    #[must_use]
    pub fn by_category(&self, slug: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == slug)
            .collect()
    }

    /// The category list for navigation.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}

fn entry(id: &str, name: &str, price_cents: i64, category: &str, description: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Decimal::new(price_cents, 2),
        image: format!("/images/products/{id}.jpg"),
        category: category.to_owned(),
        description: description.to_owned(),
        in_stock: true,
    }
}

fn category(slug: &str, name: &str, icon: &str) -> Category {
    Category {
        slug: slug.to_owned(),
        name: name.to_owned(),
        icon: icon.to_owned(),
    }
}
