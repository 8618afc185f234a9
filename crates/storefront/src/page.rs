//! In-memory model of the page markup the widget drives.
//!
//! Only the parts the widget reads or writes are modelled: a fixed set of
//! named elements (any of which may be absent), the document body, the
//! add-to-cart buttons and the navigation links.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Logical names of the elements the widget looks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    Header,
    Hamburger,
    Nav,
    CartButton,
    CartSidebar,
    CartOverlay,
    CartClose,
    ClearCart,
    CartItems,
    CartFooter,
    CartTotal,
    CartCount,
    Toast,
    ContactForm,
}

impl ElementId {
    /// Every element, in page order.
    pub const ALL: [Self; 14] = [
        Self::Header,
        Self::Hamburger,
        Self::Nav,
        Self::CartButton,
        Self::CartSidebar,
        Self::CartOverlay,
        Self::CartClose,
        Self::ClearCart,
        Self::CartItems,
        Self::CartFooter,
        Self::CartTotal,
        Self::CartCount,
        Self::Toast,
        Self::ContactForm,
    ];

    /// The `id` attribute used in the markup.
    #[must_use]
    pub const fn dom_id(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Hamburger => "hamburger",
            Self::Nav => "nav",
            Self::CartButton => "cartBtn",
            Self::CartSidebar => "cartSidebar",
            Self::CartOverlay => "cartOverlay",
            Self::CartClose => "cartClose",
            Self::ClearCart => "clearCart",
            Self::CartItems => "cartItems",
            Self::CartFooter => "cartFooter",
            Self::CartTotal => "cartTotal",
            Self::CartCount => "cartCount",
            Self::Toast => "toast",
            Self::ContactForm => "contactForm",
        }
    }

    /// Reverse of [`ElementId::dom_id`].
    #[must_use]
    pub fn from_dom_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.dom_id() == id)
    }
}

/// A single element's mutable state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    classes: BTreeSet<String>,
    text: String,
    inner_html: String,
    styles: BTreeMap<String, String>,
    fields: BTreeMap<String, String>,
}

impl Element {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an element carrying the given space-separated classes.
    #[must_use]
    pub fn with_classes(class_name: &str) -> Self {
        let mut element = Self::new();
        element.set_class_name(class_name);
        element
    }

    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains(name)
    }

    pub fn add_class(&mut self, name: &str) {
        self.classes.insert(name.to_string());
    }

    pub fn remove_class(&mut self, name: &str) {
        self.classes.remove(name);
    }

    /// Toggle `name`, or force it on/off. Returns whether the class is now
    /// present.
    pub fn toggle_class(&mut self, name: &str, force: Option<bool>) -> bool {
        let on = force.unwrap_or_else(|| !self.has_class(name));
        if on {
            self.add_class(name);
        } else {
            self.remove_class(name);
        }
        on
    }

    /// Replace the whole class list with the space-separated `class_name`.
    pub fn set_class_name(&mut self, class_name: &str) {
        self.classes = class_name.split_whitespace().map(str::to_string).collect();
    }

    /// Classes joined by spaces, sorted.
    #[must_use]
    pub fn class_name(&self) -> String {
        self.classes.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[must_use]
    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    pub fn set_inner_html(&mut self, html: impl Into<String>) {
        self.inner_html = html.into();
    }

    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    /// Set an inline style. An empty value clears the property.
    pub fn set_style(&mut self, property: &str, value: &str) {
        if value.is_empty() {
            self.styles.remove(property);
        } else {
            self.styles.insert(property.to_string(), value.to_string());
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_string(), value.into());
    }

    /// Reset every form field to empty.
    pub fn reset_fields(&mut self) {
        for value in self.fields.values_mut() {
            value.clear();
        }
    }
}

/// An add-to-cart control as found in the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCartButton {
    /// Raw `data-id` attribute; not guaranteed to be a valid product id.
    pub product_id: String,
    pub label: String,
    pub background: Option<String>,
}

impl AddToCartButton {
    #[must_use]
    pub fn new(product_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            label: label.into(),
            background: None,
        }
    }
}

/// The document: optional named elements plus body and repeated controls.
#[derive(Debug, Clone, Default)]
pub struct Page {
    elements: HashMap<ElementId, Element>,
    body: Element,
    add_buttons: Vec<AddToCartButton>,
    nav_links: usize,
}

impl Page {
    /// An empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The shop front: every element present, one add-to-cart button per
    /// product 1 through 6, five navigation links.
    #[must_use]
    pub fn storefront() -> Self {
        let mut page = Self::new()
            .with_elements(ElementId::ALL.into_iter().filter(|e| *e != ElementId::ContactForm))
            .with_nav_links(5);
        page.add_buttons = (1..=6)
            .map(|id| AddToCartButton::new(id.to_string(), "Add to Cart"))
            .collect();
        page
    }

    /// The contact page: chrome, cart sidebar and the contact form.
    #[must_use]
    pub fn contact() -> Self {
        Self::storefront()
            .without_add_buttons()
            .with_contact_form(&["name", "email", "message"])
    }

    /// The checkout page: header and navigation only.
    #[must_use]
    pub fn checkout() -> Self {
        Self::new()
            .with_elements([ElementId::Header, ElementId::Hamburger, ElementId::Nav])
            .with_nav_links(5)
    }

    /// Add the given elements, empty, with their markup default classes.
    #[must_use]
    pub fn with_elements(mut self, ids: impl IntoIterator<Item = ElementId>) -> Self {
        for id in ids {
            let element = match id {
                ElementId::Toast => Element::with_classes("toast"),
                ElementId::CartCount => Element::with_classes("cart-count"),
                _ => Element::new(),
            };
            self.elements.insert(id, element);
        }
        self
    }

    /// Add a contact form with the named, empty fields.
    #[must_use]
    pub fn with_contact_form(mut self, fields: &[&str]) -> Self {
        let mut form = Element::new();
        for name in fields {
            form.set_field(name, "");
        }
        self.elements.insert(ElementId::ContactForm, form);
        self
    }

    #[must_use]
    pub fn with_add_button(mut self, button: AddToCartButton) -> Self {
        self.add_buttons.push(button);
        self
    }

    #[must_use]
    pub fn without_add_buttons(mut self) -> Self {
        self.add_buttons.clear();
        self
    }

    #[must_use]
    pub fn with_nav_links(mut self, count: usize) -> Self {
        self.nav_links = count;
        self
    }

    #[must_use]
    pub fn without(mut self, id: ElementId) -> Self {
        self.elements.remove(&id);
        self
    }

    #[must_use]
    pub fn has(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    #[must_use]
    pub const fn body(&self) -> &Element {
        &self.body
    }

    pub const fn body_mut(&mut self) -> &mut Element {
        &mut self.body
    }

    /// Whether page scrolling is currently disabled.
    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        self.body.style("overflow") == Some("hidden")
    }

    pub fn set_scroll_locked(&mut self, locked: bool) {
        self.body.set_style("overflow", if locked { "hidden" } else { "" });
    }

    #[must_use]
    pub fn add_buttons(&self) -> &[AddToCartButton] {
        &self.add_buttons
    }

    pub fn add_button_mut(&mut self, index: usize) -> Option<&mut AddToCartButton> {
        self.add_buttons.get_mut(index)
    }

    #[must_use]
    pub const fn nav_links(&self) -> usize {
        self.nav_links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_class_semantics() {
        let mut el = Element::new();
        assert!(el.toggle_class("open", None));
        assert!(el.has_class("open"));
        assert!(!el.toggle_class("open", None));
        assert!(!el.has_class("open"));

        assert!(el.toggle_class("active", Some(true)));
        assert!(el.toggle_class("active", Some(true)));
        assert!(!el.toggle_class("active", Some(false)));
        assert!(!el.has_class("active"));
    }

    #[test]
    fn test_set_class_name_replaces_all() {
        let mut el = Element::with_classes("toast show success");
        assert_eq!(el.class_name(), "show success toast");
        el.set_class_name("toast");
        assert_eq!(el.class_name(), "toast");
    }

    #[test]
    fn test_style_clearing() {
        let mut el = Element::new();
        el.set_style("display", "flex");
        assert_eq!(el.style("display"), Some("flex"));
        el.set_style("display", "");
        assert_eq!(el.style("display"), None);
    }

    #[test]
    fn test_reset_fields() {
        let mut page = Page::contact();
        let form = page.get_mut(ElementId::ContactForm).expect("form");
        form.set_field("email", "a@b.c");
        form.reset_fields();
        assert_eq!(form.field("email"), Some(""));
    }

    #[test]
    fn test_dom_id_roundtrip() {
        for id in ElementId::ALL {
            assert_eq!(ElementId::from_dom_id(id.dom_id()), Some(id));
        }
        assert_eq!(ElementId::from_dom_id("sidebar"), None);
    }

    #[test]
    fn test_presets() {
        let shop = Page::storefront();
        assert!(shop.has(ElementId::CartItems));
        assert!(!shop.has(ElementId::ContactForm));
        assert_eq!(shop.add_buttons().len(), 6);

        let contact = Page::contact();
        assert!(contact.has(ElementId::ContactForm));
        assert!(contact.add_buttons().is_empty());

        let checkout = Page::checkout();
        assert!(!checkout.has(ElementId::CartSidebar));
        assert!(!checkout.has(ElementId::Toast));
    }

    #[test]
    fn test_scroll_lock() {
        let mut page = Page::new();
        assert!(!page.scroll_locked());
        page.set_scroll_locked(true);
        assert!(page.scroll_locked());
        page.set_scroll_locked(false);
        assert!(!page.scroll_locked());
        assert_eq!(page.body().style("overflow"), None);
    }
}
