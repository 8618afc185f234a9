//! The mounted cart widget.
//!
//! [`CartWidget::mount`] is the DOM-ready step: it detects which features the
//! page supports and renders the cart once. After that every input goes
//! through [`CartWidget::handle`], which runs to completion before the next
//! event, and deferred callbacks run from [`CartWidget::advance`].

mod cart;
mod chrome;
mod contact;

pub use cart::{ADDED_BACKGROUND, ADDED_LABEL};
pub use contact::CONTACT_SENT_MESSAGE;

use std::collections::HashMap;
use std::time::Duration;

use tracing::instrument;

use crate::cart::CartStore;
use crate::config::WidgetConfig;
use crate::events::{ClickTarget, Propagation, UiEvent};
use crate::features::{Feature, Features};
use crate::page::{ElementId, Page};
use crate::render::render_cart;
use crate::storage::Storage;
use crate::timer::{TimerId, TimerQueue};
use crate::toast::{Toast, ToastKind};

/// Callbacks deferred through the timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    DismissToast,
    RevertAddButton { index: usize },
}

/// An add-to-cart button currently showing its acknowledgment.
#[derive(Debug)]
struct Acknowledged {
    original_label: String,
    timer: TimerId,
}

/// Cart store, page and UI state for one page session.
#[derive(Debug)]
pub struct CartWidget<S> {
    config: WidgetConfig,
    store: CartStore<S>,
    page: Page,
    features: Features,
    timers: TimerQueue<Deferred>,
    toast: Toast,
    acknowledged: HashMap<usize, Acknowledged>,
}

impl<S: Storage> CartWidget<S> {
    /// Attach to `page`: detect features and render the loaded cart.
    pub fn mount(config: WidgetConfig, store: CartStore<S>, page: Page) -> Self {
        let features = Features::detect(&page);
        tracing::info!(
            features = ?features.iter().collect::<Vec<_>>(),
            lines = store.cart().len(),
            "Cart widget mounted"
        );

        let mut widget = Self {
            config,
            store,
            page,
            features,
            timers: TimerQueue::new(),
            toast: Toast::new(),
            acknowledged: HashMap::new(),
        };
        widget.render();
        widget
    }

    /// Dispatch one event.
    #[instrument(skip(self))]
    pub fn handle(&mut self, event: UiEvent) -> Propagation {
        match event {
            UiEvent::Click(target) => self.handle_click(target),
            UiEvent::Submit(ElementId::ContactForm) if self.enabled(Feature::ContactForm) => {
                self.submit_contact();
                return Propagation::PreventDefault;
            }
            UiEvent::Submit(_) => {}
            UiEvent::Scroll { y } => {
                if self.enabled(Feature::StickyHeader) {
                    self.update_header(y);
                }
            }
            UiEvent::KeyDown { key } => {
                if key == "Escape" && self.is_cart_open() {
                    self.close_cart();
                }
            }
        }
        Propagation::Continue
    }

    fn handle_click(&mut self, target: ClickTarget) {
        match target {
            ClickTarget::Element(ElementId::CartButton) if self.enabled(Feature::OpenControl) => {
                self.open_cart();
            }
            ClickTarget::Element(ElementId::CartClose) if self.enabled(Feature::CloseControl) => {
                self.close_cart();
            }
            ClickTarget::Element(ElementId::CartOverlay)
                if self.enabled(Feature::OverlayDismiss) =>
            {
                self.close_cart();
            }
            ClickTarget::Element(ElementId::ClearCart) if self.enabled(Feature::ClearControl) => {
                self.clear_cart();
            }
            ClickTarget::Element(ElementId::Hamburger) if self.enabled(Feature::MobileNav) => {
                self.toggle_nav();
            }
            ClickTarget::NavLink if self.enabled(Feature::MobileNav) => self.close_nav(),
            ClickTarget::AddToCart { button } => self.add_from_button(button),
            ClickTarget::CartItemControl { action, id } if self.enabled(Feature::ItemControls) => {
                self.item_control(&action, &id);
            }
            other => tracing::trace!(click = ?other, "Click ignored"),
        }
    }

    /// Move the clock forward, running any deferred callbacks that come due.
    pub fn advance(&mut self, by: Duration) {
        for task in self.timers.advance(by) {
            match task {
                Deferred::DismissToast => {
                    if let Some(region) = self.page.get_mut(ElementId::Toast) {
                        self.toast.dismiss(region);
                    }
                }
                Deferred::RevertAddButton { index } => self.revert_button(index),
            }
        }
    }

    /// Re-render the cart sidebar from the store.
    pub fn render(&mut self) {
        if !self.enabled(Feature::CartView) {
            return;
        }
        if let Err(e) = render_cart(&mut self.page, &self.store, self.config.currency) {
            tracing::error!(error = %e, "Failed to render cart");
        }
    }

    /// Slide the cart panel in and lock page scrolling.
    pub fn open_cart(&mut self) {
        self.set_cart_open(true);
    }

    /// Slide the cart panel out and restore page scrolling.
    pub fn close_cart(&mut self) {
        self.set_cart_open(false);
    }

    fn set_cart_open(&mut self, open: bool) {
        if !self.enabled(Feature::CartPanel) {
            return;
        }
        if let Some(sidebar) = self.page.get_mut(ElementId::CartSidebar) {
            sidebar.toggle_class("open", Some(open));
        }
        if let Some(overlay) = self.page.get_mut(ElementId::CartOverlay) {
            overlay.toggle_class("show", Some(open));
        }
        self.page.set_scroll_locked(open);
        tracing::debug!(open, "Cart panel toggled");
    }

    /// Whether the cart panel is showing.
    #[must_use]
    pub fn is_cart_open(&self) -> bool {
        self.page
            .get(ElementId::CartSidebar)
            .is_some_and(|sidebar| sidebar.has_class("open"))
    }

    /// Show `message` in the toast region, replacing any current message.
    pub fn show_toast(&mut self, message: &str, kind: ToastKind) {
        if !self.enabled(Feature::Toast) {
            return;
        }
        if let Some(region) = self.page.get_mut(ElementId::Toast) {
            self.toast.show(
                region,
                &mut self.timers,
                message,
                kind,
                self.config.toast_duration,
                Deferred::DismissToast,
            );
        }
    }
}

impl<S> CartWidget<S> {
    fn enabled(&self, feature: Feature) -> bool {
        self.features.is_enabled(feature)
    }

    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    #[must_use]
    pub const fn store(&self) -> &CartStore<S> {
        &self.store
    }

    #[must_use]
    pub const fn features(&self) -> &Features {
        &self.features
    }

    #[must_use]
    pub const fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Number of deferred callbacks still waiting.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Unmount, handing back the store and the page.
    pub fn into_parts(self) -> (CartStore<S>, Page) {
        (self.store, self.page)
    }
}
