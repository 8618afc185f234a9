//! Sticky header and mobile navigation.

use super::CartWidget;
use crate::page::ElementId;
use crate::storage::Storage;

impl<S: Storage> CartWidget<S> {
    /// Mark the header `scrolled` once the page is past the threshold.
    pub(super) fn update_header(&mut self, y: f64) {
        let scrolled = y > self.config.scroll_threshold;
        if let Some(header) = self.page.get_mut(ElementId::Header) {
            header.toggle_class("scrolled", Some(scrolled));
        }
    }

    /// Hamburger click: flip the navigation open or closed.
    pub(super) fn toggle_nav(&mut self) {
        let Some(nav) = self.page.get_mut(ElementId::Nav) else {
            return;
        };
        let open = nav.toggle_class("open", None);
        if let Some(hamburger) = self.page.get_mut(ElementId::Hamburger) {
            hamburger.toggle_class("active", Some(open));
        }
        self.page.set_scroll_locked(open);
        tracing::debug!(open, "Mobile navigation toggled");
    }

    /// Navigation link click: close the navigation.
    pub(super) fn close_nav(&mut self) {
        if let Some(nav) = self.page.get_mut(ElementId::Nav) {
            nav.remove_class("open");
        }
        if let Some(hamburger) = self.page.get_mut(ElementId::Hamburger) {
            hamburger.remove_class("active");
        }
        self.page.set_scroll_locked(false);
    }
}
