//! Page capability detection.
//!
//! The widget asks the page once, at mount, which of its features can run.
//! A feature is enabled only when every element it needs is present; events
//! for disabled features are ignored from then on.

use std::collections::BTreeSet;

use crate::page::{ElementId, Page};

/// A unit of widget behavior that depends on page elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    /// Cart items list, footer, total and count badge rendering.
    CartView,
    /// Sliding cart sidebar with its overlay.
    CartPanel,
    /// Header cart button opening the panel.
    OpenControl,
    /// Close button inside the panel.
    CloseControl,
    /// Clicking the overlay closes the panel.
    OverlayDismiss,
    /// "Clear cart" button.
    ClearControl,
    /// Increment/decrement/remove buttons inside the items list.
    ItemControls,
    /// Header gains `scrolled` past the scroll threshold.
    StickyHeader,
    /// Hamburger toggle for the mobile navigation.
    MobileNav,
    /// Intercepted contact form.
    ContactForm,
    /// Transient notification region.
    Toast,
}

impl Feature {
    pub const ALL: [Self; 11] = [
        Self::CartView,
        Self::CartPanel,
        Self::OpenControl,
        Self::CloseControl,
        Self::OverlayDismiss,
        Self::ClearControl,
        Self::ItemControls,
        Self::StickyHeader,
        Self::MobileNav,
        Self::ContactForm,
        Self::Toast,
    ];

    /// Elements that must all exist for the feature to be enabled.
    #[must_use]
    pub const fn required_elements(self) -> &'static [ElementId] {
        match self {
            Self::CartView => &[
                ElementId::CartItems,
                ElementId::CartFooter,
                ElementId::CartTotal,
                ElementId::CartCount,
            ],
            Self::CartPanel | Self::OverlayDismiss => {
                &[ElementId::CartSidebar, ElementId::CartOverlay]
            }
            Self::OpenControl => &[
                ElementId::CartButton,
                ElementId::CartSidebar,
                ElementId::CartOverlay,
            ],
            Self::CloseControl => &[
                ElementId::CartClose,
                ElementId::CartSidebar,
                ElementId::CartOverlay,
            ],
            Self::ClearControl => &[ElementId::ClearCart],
            Self::ItemControls => &[ElementId::CartItems],
            Self::StickyHeader => &[ElementId::Header],
            Self::MobileNav => &[ElementId::Hamburger, ElementId::Nav],
            Self::ContactForm => &[ElementId::ContactForm],
            Self::Toast => &[ElementId::Toast],
        }
    }
}

/// The set of features enabled on a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Features {
    enabled: BTreeSet<Feature>,
}

impl Features {
    /// Query `page` for every feature's required elements.
    #[must_use]
    pub fn detect(page: &Page) -> Self {
        let enabled = Feature::ALL
            .into_iter()
            .filter(|feature| feature.required_elements().iter().all(|id| page.has(*id)))
            .collect();
        Self { enabled }
    }

    #[must_use]
    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.enabled.contains(&feature)
    }

    /// Enabled features in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.enabled.iter().copied()
    }
}
