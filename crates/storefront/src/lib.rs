//! NovaByte Storefront cart widget.
//!
//! This crate provides the shop page's client-side behavior as a library:
//! a persisted shopping cart, the cart sidebar renderer and the page
//! interactions around it (cart panel, sticky header, mobile navigation,
//! contact form, toasts).
//!
//! # Architecture
//!
//! - [`catalog`] - read-only product list
//! - [`cart`] - in-memory cart and the [`cart::CartStore`] that persists it
//! - [`storage`] - local key-value storage backends
//! - [`page`] - model of the page elements the widget drives
//! - [`features`] - one-time capability detection against the page
//! - [`render`] - Askama-rendered cart sidebar
//! - [`timer`] and [`toast`] - deferred callbacks and notifications
//! - [`widget`] - event dispatch tying the above together
//!
//! Everything runs on one logical thread: each event is handled to
//! completion before the next, and delayed work is driven by
//! [`widget::CartWidget::advance`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod events;
pub mod features;
pub mod page;
pub mod render;
pub mod storage;
pub mod timer;
pub mod toast;
pub mod widget;

pub use cart::{Cart, CartLineItem, CartStore};
pub use catalog::{Catalog, Product};
pub use config::{ConfigError, WidgetConfig};
pub use events::{CartAction, ClickTarget, Propagation, UiEvent};
pub use page::{AddToCartButton, Element, ElementId, Page};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use toast::ToastKind;
pub use widget::CartWidget;
