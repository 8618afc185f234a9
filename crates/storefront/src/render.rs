//! Cart sidebar rendering.
//!
//! The display models hold pre-formatted strings so the template only lays
//! them out. Rendering touches the page only when the items list, footer,
//! total and badge are all present.

use askama::Template;
use novabyte_core::CurrencyCode;
use thiserror::Error;

use crate::cart::{Cart, CartStore};
use crate::catalog::Catalog;
use crate::page::{ElementId, Page};

/// Rendering failure.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

/// One cart row for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub icon: String,
    pub name: String,
    pub price: String,
    pub quantity: u32,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub count: u64,
}

impl CartView {
    /// Build the display model, formatting prices in `currency`.
    #[must_use]
    pub fn build(cart: &Cart, catalog: &Catalog, currency: CurrencyCode) -> Self {
        Self {
            items: cart
                .iter()
                .map(|line| CartItemView {
                    id: line.id.to_string(),
                    icon: catalog.icon_for(line.id).to_string(),
                    name: line.name.clone(),
                    price: currency.format(line.unit_price),
                    quantity: line.quantity,
                })
                .collect(),
            total: currency.format(cart.total_price()),
            count: cart.total_count(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cart items fragment.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate<'a> {
    pub cart: &'a CartView,
}

/// Rewrite the cart sidebar and badge from `store`.
///
/// Returns `Ok(false)` without touching the page if any of the cart regions
/// is missing.
///
/// # Errors
///
/// Returns `RenderError` if the items template fails; the page is left
/// unchanged in that case.
pub fn render_cart<S>(
    page: &mut Page,
    store: &CartStore<S>,
    currency: CurrencyCode,
) -> Result<bool, RenderError> {
    let regions = [
        ElementId::CartItems,
        ElementId::CartFooter,
        ElementId::CartTotal,
        ElementId::CartCount,
    ];
    if !regions.iter().all(|id| page.has(*id)) {
        return Ok(false);
    }

    let view = CartView::build(store.cart(), store.catalog(), currency);
    let markup = CartItemsTemplate { cart: &view }.render()?;

    if let Some(badge) = page.get_mut(ElementId::CartCount) {
        badge.set_text(view.count.to_string());
        badge.toggle_class("visible", Some(view.count > 0));
    }
    if let Some(items) = page.get_mut(ElementId::CartItems) {
        items.set_inner_html(markup);
    }
    if let Some(footer) = page.get_mut(ElementId::CartFooter) {
        footer.set_style("display", if view.is_empty() { "none" } else { "flex" });
    }
    if !view.is_empty() {
        if let Some(total) = page.get_mut(ElementId::CartTotal) {
            total.set_text(view.total.clone());
        }
    }

    tracing::debug!(lines = view.items.len(), count = view.count, "Cart rendered");
    Ok(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use novabyte_core::ProductId;
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::Product;
    use crate::storage::MemoryStorage;

    fn store_with(ids: &[i32]) -> CartStore<MemoryStorage> {
        let mut store = CartStore::load(Catalog::novabyte(), MemoryStorage::new(), "nb_cart");
        for id in ids {
            store.add(ProductId::new(*id)).unwrap();
        }
        store
    }

    #[test]
    fn test_empty_cart_shows_placeholder_and_hides_footer() {
        let mut page = Page::storefront();
        assert!(render_cart(&mut page, &store_with(&[]), CurrencyCode::EUR).unwrap());

        let items = page.get(ElementId::CartItems).unwrap();
        assert!(items.inner_html().contains(r#"<p class="cart-empty">Your cart is empty.</p>"#));
        assert_eq!(
            page.get(ElementId::CartFooter).unwrap().style("display"),
            Some("none")
        );

        let badge = page.get(ElementId::CartCount).unwrap();
        assert_eq!(badge.text(), "0");
        assert!(!badge.has_class("visible"));
    }

    #[test]
    fn test_rows_in_insertion_order_with_controls() {
        let mut page = Page::storefront();
        let store = store_with(&[3, 1, 3]);
        render_cart(&mut page, &store, CurrencyCode::EUR).unwrap();

        let html = page.get(ElementId::CartItems).unwrap().inner_html();
        let backpack = html.find("Urban Carry Backpack").unwrap();
        let watch = html.find("SmartWatch Pro").unwrap();
        assert!(backpack < watch);

        assert!(html.contains("🎒"));
        assert!(html.contains("€89.00"));
        assert!(html.contains(r#"<span class="qty-val">2</span>"#));
        for action in ["increment", "decrement", "remove"] {
            assert!(html.contains(&format!(r#"data-action="{action}" data-id="3""#)));
        }

        assert_eq!(page.get(ElementId::CartTotal).unwrap().text(), "€377.00");
        assert_eq!(
            page.get(ElementId::CartFooter).unwrap().style("display"),
            Some("flex")
        );
        let badge = page.get(ElementId::CartCount).unwrap();
        assert_eq!(badge.text(), "3");
        assert!(badge.has_class("visible"));
    }

    #[test]
    fn test_missing_region_short_circuits() {
        let mut page = Page::storefront().without(ElementId::CartTotal);
        let store = store_with(&[1]);
        assert!(!render_cart(&mut page, &store, CurrencyCode::EUR).unwrap());

        assert_eq!(page.get(ElementId::CartItems).unwrap().inner_html(), "");
        assert_eq!(page.get(ElementId::CartCount).unwrap().text(), "");
    }

    #[test]
    fn test_fallback_icon_and_escaping() {
        let catalog = Catalog::new([Product::new(
            7,
            "<b>Limited & rare",
            "🧢",
            Decimal::new(1250, 2),
        )]);
        let mut store = CartStore::load(catalog, MemoryStorage::new(), "nb_cart");
        store.add(ProductId::new(7)).unwrap();

        let view = CartView::build(store.cart(), &Catalog::novabyte(), CurrencyCode::EUR);
        let html = CartItemsTemplate { cart: &view }.render().unwrap();

        assert!(html.contains("📦"));
        assert!(html.contains("&lt;b&gt;Limited &amp; rare"));
        assert!(html.contains("€12.50"));
    }
}
