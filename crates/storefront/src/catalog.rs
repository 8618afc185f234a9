//! Static product catalog.
//!
//! The catalog is defined once at startup and never mutated. Cart line items
//! copy name and price out of it at add time, so later catalog changes never
//! reprice an existing cart.

use indexmap::IndexMap;
use novabyte_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Icon shown for a cart line whose product is no longer in the catalog.
pub const FALLBACK_ICON: &str = "📦";

/// A product offered by the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Short glyph used as the product thumbnail.
    pub icon: String,
    pub unit_price: Decimal,
}

impl Product {
    /// Create a product.
    #[must_use]
    pub fn new(id: i32, name: &str, icon: &str, unit_price: Decimal) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.to_string(),
            icon: icon.to_string(),
            unit_price,
        }
    }
}

/// Read-only mapping from product id to product, in definition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: IndexMap<ProductId, Product>,
}

impl Catalog {
    /// Build a catalog. A later product with a duplicate id replaces the
    /// earlier one in place.
    #[must_use]
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// The NovaByte storefront line-up.
    #[must_use]
    pub fn novabyte() -> Self {
        Self::new([
            Product::new(1, "SmartWatch Pro", "⌚", Decimal::new(19900, 2)),
            Product::new(2, "NoiseOff Pro Headphones", "🎧", Decimal::new(14900, 2)),
            Product::new(3, "Urban Carry Backpack", "🎒", Decimal::new(8900, 2)),
            Product::new(4, "Premium Tech Tee", "👕", Decimal::new(3900, 2)),
            Product::new(5, "Thermo Bottle 500ml", "🍶", Decimal::new(3500, 2)),
            Product::new(6, "MagCharge 65W Dock", "⚡", Decimal::new(7900, 2)),
        ])
    }

    /// Look up a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Icon for `id`, or [`FALLBACK_ICON`] when the product is unknown.
    #[must_use]
    pub fn icon_for(&self, id: ProductId) -> &str {
        self.get(id).map_or(FALLBACK_ICON, |p| p.icon.as_str())
    }

    /// Iterate products in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::novabyte()
    }
}
