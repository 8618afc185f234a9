//! UI events fed into the widget.

use std::str::FromStr;

use novabyte_core::ProductId;
use thiserror::Error;

use crate::cart::CartStore;
use crate::page::ElementId;
use crate::storage::{Storage, StorageError};

/// A discrete user input, already resolved to its target.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Click(ClickTarget),
    /// A form was submitted.
    Submit(ElementId),
    /// The window scrolled to vertical offset `y`.
    Scroll { y: f64 },
    /// A key went down anywhere in the document.
    KeyDown { key: String },
}

impl UiEvent {
    /// Click on a named element.
    #[must_use]
    pub const fn click(id: ElementId) -> Self {
        Self::Click(ClickTarget::Element(id))
    }

    /// Click on the `button`-th add-to-cart control.
    #[must_use]
    pub const fn add_to_cart(button: usize) -> Self {
        Self::Click(ClickTarget::AddToCart { button })
    }

    /// Click on a control inside the cart items list, carrying its raw
    /// `data-action` and `data-id` attributes.
    #[must_use]
    pub fn item_control(action: &str, id: &str) -> Self {
        Self::Click(ClickTarget::CartItemControl {
            action: action.to_string(),
            id: id.to_string(),
        })
    }

    #[must_use]
    pub fn key(key: &str) -> Self {
        Self::KeyDown {
            key: key.to_string(),
        }
    }
}

/// What a click landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    Element(ElementId),
    AddToCart { button: usize },
    CartItemControl { action: String, id: String },
    /// Any link inside the navigation.
    NavLink,
}

/// Whether the browser's default handling should still run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    PreventDefault,
}

/// Unrecognized `data-action` value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown cart action: {0}")]
pub struct UnknownAction(pub String);

/// Actions available on a cart row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Increment,
    Decrement,
    Remove,
}

impl CartAction {
    /// The `data-action` token rendered into the markup.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::Remove => "remove",
        }
    }

    /// Run the action against `store`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the updated cart could not be persisted.
    pub fn apply<S: Storage>(
        self,
        store: &mut CartStore<S>,
        id: ProductId,
    ) -> Result<(), StorageError> {
        match self {
            Self::Increment => store.change_quantity(id, 1),
            Self::Decrement => store.change_quantity(id, -1),
            Self::Remove => store.remove(id),
        }
    }
}

impl FromStr for CartAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increment" | "inc" => Ok(Self::Increment),
            "decrement" | "dec" => Ok(Self::Decrement),
            "remove" => Ok(Self::Remove),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}
