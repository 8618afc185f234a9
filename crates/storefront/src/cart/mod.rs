//! Cart state.
//!
//! [`Cart`] is the pure in-memory mapping of product id to line item, with
//! the derived totals. [`CartStore`] wraps it with the catalog and a storage
//! backend and persists after every mutation.

mod snapshot;
mod store;

pub use snapshot::{decode, encode};
pub use store::CartStore;

use indexmap::IndexMap;
use novabyte_core::ProductId;
use rust_decimal::Decimal;

use crate::catalog::Product;

/// One product in the cart.
///
/// Name and unit price are copied from the catalog when the line is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineItem {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    /// Always at least 1; a line that would drop to 0 is removed instead.
    pub quantity: u32,
}

impl CartLineItem {
    /// Unit price times quantity, saturating at the largest representable amount.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Insertion-ordered mapping of product id to line item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: IndexMap<ProductId, CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`, creating the line on first add.
    pub fn add(&mut self, product: &Product) {
        self.lines
            .entry(product.id)
            .and_modify(|line| line.quantity = line.quantity.saturating_add(1))
            .or_insert_with(|| CartLineItem {
                id: product.id,
                name: product.name.clone(),
                unit_price: product.unit_price,
                quantity: 1,
            });
    }

    /// Apply `delta` to the quantity of `id`, removing the line when the
    /// result is zero or less.
    ///
    /// Returns `false` without touching anything if there is no such line.
    pub fn change_quantity(&mut self, id: ProductId, delta: i64) -> bool {
        let Some(line) = self.lines.get_mut(&id) else {
            return false;
        };

        let next = i64::from(line.quantity).saturating_add(delta);
        if next <= 0 {
            self.lines.shift_remove(&id);
        } else {
            line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        }
        true
    }

    /// Remove the line for `id`, if present.
    pub fn remove(&mut self, id: ProductId) -> Option<CartLineItem> {
        self.lines.shift_remove(&id)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartLineItem> {
        self.lines.get(&id)
    }

    /// Iterate lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLineItem> {
        self.lines.values()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.lines.values().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of unit price times quantity, saturating instead of overflowing.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines
            .values()
            .map(CartLineItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Insert a line as-is. Lines with zero quantity are ignored.
    pub(crate) fn insert_line(&mut self, line: CartLineItem) {
        if line.quantity > 0 {
            self.lines.insert(line.id, line);
        }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLineItem;
    type IntoIter = indexmap::map::Values<'a, ProductId, CartLineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.values()
    }
}
