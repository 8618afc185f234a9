//! Cart interaction handlers.

use novabyte_core::ProductId;

use super::{Acknowledged, CartWidget, Deferred};
use crate::events::CartAction;
use crate::storage::Storage;
use crate::toast::ToastKind;

/// Label shown on an add-to-cart button right after a successful add.
pub const ADDED_LABEL: &str = "✓ Added!";

/// Background shown with [`ADDED_LABEL`].
pub const ADDED_BACKGROUND: &str = "linear-gradient(135deg,#22c55e,#16a34a)";

impl<S: Storage> CartWidget<S> {
    /// Add-to-cart button click: add, render, open the panel, notify and
    /// acknowledge on the button. An unknown product does nothing at all.
    pub(super) fn add_from_button(&mut self, index: usize) {
        let Some(button) = self.page.add_buttons().get(index) else {
            tracing::debug!(index, "Add-to-cart click on missing button");
            return;
        };
        let Ok(id) = button.product_id.parse::<ProductId>() else {
            tracing::debug!(raw_id = %button.product_id, "Add-to-cart button has invalid product id");
            return;
        };
        let Some(name) = self.store.catalog().get(id).map(|p| p.name.clone()) else {
            tracing::debug!(product_id = %id, "Add-to-cart for product not in catalog");
            return;
        };

        if let Err(e) = self.store.add(id) {
            tracing::error!(product_id = %id, error = %e, "Failed to persist cart");
        }
        self.render();
        self.open_cart();
        self.show_toast(&format!("✓ {name} added"), ToastKind::Success);
        self.acknowledge_button(index);
    }

    /// Swap the button label for the acknowledgment and schedule the revert.
    /// A button clicked again while acknowledged keeps its first label and
    /// restarts the countdown.
    fn acknowledge_button(&mut self, index: usize) {
        let Some(button) = self.page.add_button_mut(index) else {
            return;
        };

        let original_label = match self.acknowledged.remove(&index) {
            Some(previous) => {
                self.timers.cancel(previous.timer);
                previous.original_label
            }
            None => button.label.clone(),
        };

        button.label = ADDED_LABEL.to_string();
        button.background = Some(ADDED_BACKGROUND.to_string());

        let timer = self.timers.schedule(
            self.config.added_feedback_duration,
            Deferred::RevertAddButton { index },
        );
        self.acknowledged.insert(
            index,
            Acknowledged {
                original_label,
                timer,
            },
        );
    }

    pub(super) fn revert_button(&mut self, index: usize) {
        let Some(ack) = self.acknowledged.remove(&index) else {
            return;
        };
        if let Some(button) = self.page.add_button_mut(index) {
            button.label = ack.original_label;
            button.background = None;
        }
    }

    /// Delegated click on a cart row control.
    pub(super) fn item_control(&mut self, action: &str, raw_id: &str) {
        let action = match action.parse::<CartAction>() {
            Ok(action) => action,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring cart row click");
                return;
            }
        };
        let Ok(id) = raw_id.parse::<ProductId>() else {
            tracing::debug!(raw_id, "Cart row control has invalid product id");
            return;
        };

        if let Err(e) = action.apply(&mut self.store, id) {
            tracing::error!(product_id = %id, action = action.as_str(), error = %e, "Failed to persist cart");
        }
        self.render();
    }

    /// "Clear cart" click.
    pub(super) fn clear_cart(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::error!(error = %e, "Failed to persist cleared cart");
        }
        self.render();
        self.show_toast("Cart cleared.", ToastKind::Info);
    }
}
