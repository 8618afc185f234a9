//! Persisted cart store.

use novabyte_core::ProductId;
use rust_decimal::Decimal;
use tracing::instrument;

use super::{Cart, decode, encode};
use crate::catalog::{Catalog, Product};
use crate::storage::{Storage, StorageError};

/// The cart together with the catalog it draws from and the storage it
/// persists to.
///
/// Every mutation updates memory first and then writes the whole snapshot.
/// A failed write is returned to the caller but the in-memory change stays.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    catalog: Catalog,
    storage: S,
    key: String,
}

impl<S: Storage> CartStore<S> {
    /// Rehydrate the cart from `storage`.
    ///
    /// A missing key, an unreadable backend or a malformed snapshot all
    /// produce an empty cart; the latter two are logged.
    pub fn load(catalog: Catalog, storage: S, key: impl Into<String>) -> Self {
        let key = key.into();

        let cart = match storage.get_item(&key) {
            Ok(Some(raw)) => decode(&raw).unwrap_or_else(|e| {
                tracing::warn!(key = %key, error = %e, "Discarding malformed stored cart");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read stored cart");
                Cart::new()
            }
        };

        tracing::debug!(key = %key, lines = cart.len(), "Cart loaded");

        Self {
            cart,
            catalog,
            storage,
            key,
        }
    }

    /// Add one unit of product `id`. Unknown products are ignored.
    ///
    /// Returns the product that was added.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot could not be written.
    #[instrument(skip(self))]
    pub fn add(&mut self, id: ProductId) -> Result<Option<&Product>, StorageError> {
        let Some(product) = self.catalog.get(id) else {
            tracing::debug!("Ignoring add for unknown product");
            return Ok(None);
        };

        self.cart.add(product);
        tracing::debug!(
            quantity = self.cart.get(id).map_or(0, |line| line.quantity),
            "Added to cart"
        );
        self.save()?;
        Ok(self.catalog.get(id))
    }

    /// Adjust the quantity of product `id` by `delta`; the line is removed
    /// when the quantity drops to zero or below. No line means no change.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot could not be written.
    #[instrument(skip(self))]
    pub fn change_quantity(&mut self, id: ProductId, delta: i64) -> Result<(), StorageError> {
        if !self.cart.change_quantity(id, delta) {
            tracing::debug!("Ignoring quantity change for product not in cart");
            return Ok(());
        }
        tracing::debug!(
            quantity = self.cart.get(id).map_or(0, |line| line.quantity),
            "Quantity changed"
        );
        self.save()
    }

    /// Remove product `id` from the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot could not be written.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: ProductId) -> Result<(), StorageError> {
        let removed = self.cart.remove(id);
        tracing::debug!(removed = removed.is_some(), "Removed from cart");
        self.save()
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot could not be written.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.cart.clear();
        tracing::debug!("Cart cleared");
        self.save()
    }

    /// Write the current snapshot to storage.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or the write fails.
    pub fn save(&mut self) -> Result<(), StorageError> {
        let raw = encode(&self.cart)?;
        self.storage.set_item(&self.key, &raw)
    }
}

impl<S> CartStore<S> {
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Storage key the snapshot is written under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Sum of quantities.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.cart.total_count()
    }

    /// Sum of unit price times quantity.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.cart.total_price()
    }

    /// Give back the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    const KEY: &str = "nb_cart";

    /// Storage whose writes always fail.
    #[derive(Debug, Default)]
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io {
                path: "quota".into(),
                source: std::io::Error::other("quota exceeded"),
            })
        }

        fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    fn empty_store() -> CartStore<MemoryStorage> {
        CartStore::load(Catalog::novabyte(), MemoryStorage::new(), KEY)
    }

    #[test]
    fn test_add_persists_snapshot() {
        let mut store = empty_store();
        let added = store.add(ProductId::new(3)).unwrap().map(|p| p.name.clone());
        assert_eq!(added.as_deref(), Some("Urban Carry Backpack"));

        let raw = store.storage().raw(KEY).unwrap();
        assert!(raw.contains(r#""qty":1"#));
    }

    #[test]
    fn test_add_unknown_product_does_not_write() {
        let mut store = empty_store();
        assert!(store.add(ProductId::new(99)).unwrap().is_none());
        assert!(store.cart().is_empty());
        assert!(store.storage().raw(KEY).is_none());
    }

    #[test]
    fn test_add_add_decrement_scenario() {
        let mut store = empty_store();
        store.add(ProductId::new(3)).unwrap();
        store.add(ProductId::new(3)).unwrap();
        store.change_quantity(ProductId::new(3), -1).unwrap();

        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart().get(ProductId::new(3)).unwrap().quantity, 1);
        assert_eq!(store.total_price(), Decimal::new(8900, 2));
    }

    #[test]
    fn test_change_quantity_on_empty_store() {
        let mut store = empty_store();
        store.change_quantity(ProductId::new(99), -1).unwrap();
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_remove_and_clear_persist() {
        let mut store = empty_store();
        store.add(ProductId::new(1)).unwrap();
        store.add(ProductId::new(2)).unwrap();

        store.remove(ProductId::new(1)).unwrap();
        store.remove(ProductId::new(1)).unwrap();
        assert_eq!(store.total_count(), 1);

        store.clear().unwrap();
        assert_eq!(store.storage().raw(KEY), Some("{}"));
    }

    #[test]
    fn test_reload_restores_cart() {
        let mut store = empty_store();
        store.add(ProductId::new(6)).unwrap();
        store.add(ProductId::new(1)).unwrap();
        store.add(ProductId::new(6)).unwrap();
        let before = store.cart().clone();

        let reloaded = CartStore::load(Catalog::novabyte(), store.into_storage(), KEY);
        assert_eq!(reloaded.cart(), &before);
        let order: Vec<i32> = reloaded.cart().iter().map(|l| l.id.as_i32()).collect();
        assert_eq!(order, vec![6, 1]);
    }

    #[test]
    fn test_malformed_snapshot_loads_empty() {
        let storage = MemoryStorage::with_item(KEY, "{not json");
        let store = CartStore::load(Catalog::novabyte(), storage, KEY);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut store = CartStore::load(Catalog::novabyte(), ReadOnlyStorage, KEY);
        assert!(store.add(ProductId::new(4)).is_err());
        assert_eq!(store.total_count(), 1);
    }

    #[test]
    fn test_stored_lines_keep_their_price_after_catalog_change() {
        let storage = MemoryStorage::with_item(
            KEY,
            r#"{"3":{"id":3,"name":"Urban Carry Backpack","price":79.0,"qty":1}}"#,
        );
        let mut store = CartStore::load(Catalog::novabyte(), storage, KEY);
        store.add(ProductId::new(3)).unwrap();

        assert_eq!(store.total_price(), Decimal::new(158, 0));
    }
}
