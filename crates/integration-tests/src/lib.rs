//! Integration tests for the NovaByte storefront cart widget.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p novabyte-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - cart store behavior and persistence through storage
//! - `storefront_widget` - page sessions driven through UI events
//!
//! Set `RUST_LOG=novabyte_storefront=debug` to see the widget's log output.

use novabyte_storefront::{
    CartStore, CartWidget, Catalog, MemoryStorage, Page, Storage, WidgetConfig,
};

/// Storage key used by every helper.
pub const CART_KEY: &str = "nb_cart";

/// Install a test-writer tracing subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "novabyte_storefront=warn".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Load a store over `storage` with the default catalog.
pub fn load_store<S: Storage>(storage: S) -> CartStore<S> {
    CartStore::load(Catalog::novabyte(), storage, CART_KEY)
}

/// Mount a widget on `page` over `storage` with default configuration.
pub fn mount_on<S: Storage>(page: Page, storage: S) -> CartWidget<S> {
    init_tracing();
    CartWidget::mount(WidgetConfig::default(), load_store(storage), page)
}

/// Mount a fresh storefront page over empty in-memory storage.
#[must_use]
pub fn storefront() -> CartWidget<MemoryStorage> {
    mount_on(Page::storefront(), MemoryStorage::new())
}
