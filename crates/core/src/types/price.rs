//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places shown for every displayed amount.
const DISPLAY_SCALE: u32 = 2;

/// Error parsing a [`CurrencyCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// The code is not one of the supported ISO 4217 currencies.
    #[error("unsupported currency code: {0}")]
    Unsupported(String),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., euros, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display, e.g. `€19.99`.
    ///
    /// The amount is rounded half away from zero to exactly two decimal
    /// places, so `89` renders as `€89.00` and `0.005` as `€0.01`.
    #[must_use]
    pub fn display(&self) -> String {
        let mut amount = self
            .amount
            .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(DISPLAY_SCALE);
        format!("{}{amount}", self.currency_code.symbol())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    EUR,
    USD,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol prefixed to amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EUR => "EUR",
            Self::USD => "USD",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }

    /// Format a bare amount in this currency.
    #[must_use]
    pub fn format(self, amount: Decimal) -> String {
        Price::new(amount, self).display()
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EUR" => Ok(Self::EUR),
            "USD" => Ok(Self::USD),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(CurrencyError::Unsupported(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("valid decimal")
    }

    #[test]
    fn test_display_pads_to_two_places() {
        assert_eq!(CurrencyCode::EUR.format(dec("89")), "€89.00");
        assert_eq!(CurrencyCode::EUR.format(dec("89.5")), "€89.50");
        assert_eq!(CurrencyCode::EUR.format(Decimal::ZERO), "€0.00");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(CurrencyCode::EUR.format(dec("0.005")), "€0.01");
        assert_eq!(CurrencyCode::EUR.format(dec("10.004")), "€10.00");
        assert_eq!(CurrencyCode::USD.format(dec("1.125")), "$1.13");
    }

    #[test]
    fn test_price_display_trait() {
        let price = Price::new(dec("149"), CurrencyCode::GBP);
        assert_eq!(price.to_string(), "£149.00");
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!("eur".parse::<CurrencyCode>(), Ok(CurrencyCode::EUR));
        assert_eq!(" USD ".parse::<CurrencyCode>(), Ok(CurrencyCode::USD));
        assert_eq!(
            "XYZ".parse::<CurrencyCode>(),
            Err(CurrencyError::Unsupported("XYZ".to_string()))
        );
    }

    #[test]
    fn test_currency_code_roundtrips_through_parse() {
        for code in [
            CurrencyCode::EUR,
            CurrencyCode::USD,
            CurrencyCode::GBP,
            CurrencyCode::CAD,
            CurrencyCode::AUD,
        ] {
            assert_eq!(code.code().parse::<CurrencyCode>(), Ok(code));
        }
    }
}
