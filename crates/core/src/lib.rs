//! NovaByte Core - Shared value types.
//!
//! This crate provides the small set of types shared by the storefront cart
//! widget and its tests:
//! - [`ProductId`] - type-safe product identifier
//! - [`Price`] and [`CurrencyCode`] - decimal money with display formatting
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! rendering. This keeps it lightweight and allows it to be used anywhere.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
