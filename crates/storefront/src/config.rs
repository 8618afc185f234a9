//! Cart widget configuration.
//!
//! Every setting has a default matching the storefront's shipped behavior.
//! The embedding page may override them through a key lookup, typically the
//! `data-*` attributes of the widget root.
//!
//! # Settings
//!
//! ## Optional
//! - `cart-storage-key` - Local storage key for the cart snapshot (default: `nb_cart`)
//! - `currency` - ISO 4217 display currency (default: EUR)
//! - `scroll-threshold` - Scroll offset after which the header is marked scrolled (default: 20)
//! - `toast-ms` - Toast auto-dismiss delay in milliseconds (default: 2500)
//! - `added-feedback-ms` - Add-to-cart button acknowledgment duration (default: 1400)

use std::str::FromStr;
use std::time::Duration;

use novabyte_core::CurrencyCode;
use thiserror::Error;

/// Default local storage key for the persisted cart.
pub const DEFAULT_STORAGE_KEY: &str = "nb_cart";

const DEFAULT_SCROLL_THRESHOLD: f64 = 20.0;
const DEFAULT_TOAST_MS: u64 = 2500;
const DEFAULT_ADDED_FEEDBACK_MS: u64 = 1400;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid setting {0}: {1}")]
    InvalidSetting(String, String),
}

/// Cart widget configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    /// Key under which the cart snapshot is stored
    pub storage_key: String,
    /// Currency used to format every displayed amount
    pub currency: CurrencyCode,
    /// Vertical scroll offset that must be exceeded to mark the header scrolled
    pub scroll_threshold: f64,
    /// How long a toast stays visible
    pub toast_duration: Duration,
    /// How long an add-to-cart button shows its acknowledgment
    pub added_feedback_duration: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: CurrencyCode::EUR,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            toast_duration: Duration::from_millis(DEFAULT_TOAST_MS),
            added_feedback_duration: Duration::from_millis(DEFAULT_ADDED_FEEDBACK_MS),
        }
    }
}

impl WidgetConfig {
    /// Build configuration from a setting lookup, keeping defaults for absent keys.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a setting is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let storage_key = match lookup("cart-storage-key") {
            Some(key) if key.trim().is_empty() => {
                return Err(ConfigError::InvalidSetting(
                    "cart-storage-key".to_string(),
                    "must not be empty".to_string(),
                ));
            }
            Some(key) => key,
            None => defaults.storage_key,
        };

        let currency = parse_optional(&lookup, "currency")?.unwrap_or(defaults.currency);

        let scroll_threshold = parse_optional::<f64, _>(&lookup, "scroll-threshold")?
            .unwrap_or(defaults.scroll_threshold);
        if !scroll_threshold.is_finite() || scroll_threshold < 0.0 {
            return Err(ConfigError::InvalidSetting(
                "scroll-threshold".to_string(),
                "must be a non-negative number".to_string(),
            ));
        }

        let toast_duration = parse_optional::<u64, _>(&lookup, "toast-ms")?
            .map_or(defaults.toast_duration, Duration::from_millis);
        let added_feedback_duration =
            parse_optional::<u64, _>(&lookup, "added-feedback-ms")?
                .map_or(defaults.added_feedback_duration, Duration::from_millis);

        Ok(Self {
            storage_key,
            currency,
            scroll_threshold,
            toast_duration,
            added_feedback_duration,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional setting, reporting its key on failure.
fn parse_optional<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidSetting(key.to_string(), e.to_string()))
        })
        .transpose()
}
