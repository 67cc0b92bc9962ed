//! Monetary types for Pricewise.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Number of fractional digits stored for catalog prices.
pub const PRICE_SCALE: u32 = 2;

/// Number of integer digits a stored price may carry.
pub const MAX_PRICE_INTEGER_DIGITS: u32 = 17;

/// Whether `value` has at most [`MAX_PRICE_INTEGER_DIGITS`] integer digits.
pub fn fits_price_precision(value: Decimal) -> bool {
    value.abs() < Decimal::from(10u64.pow(MAX_PRICE_INTEGER_DIGITS))
}

/// Round a value to `dp` fractional digits, halves away from zero.
///
/// For the non-negative amounts handled by the catalog this is classic
/// round-half-up; banker's rounding must never be used for prices.
///
/// Returns `None` when the value has too many integer digits to be
/// carried at scale `dp`.
pub fn round_half_up(value: Decimal, dp: u32) -> Option<Decimal> {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    // round_dp never widens the scale, so 75 stays "75" unless rescaled
    rounded.rescale(dp);
    (rounded.scale() == dp).then_some(rounded)
}

/// A monetary amount with currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount value.
    #[serde(with = "rust_decimal::serde::str")]
    pub value: Decimal,
    /// ISO 4217 currency code.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money instance.
    pub fn new(value: Decimal, currency: Currency) -> Self {
        Self { value, currency }
    }

    /// Create from a string value.
    pub fn parse(value: &str, currency: Currency) -> Result<Self, ValidationError> {
        let parsed = value
            .trim()
            .parse::<Decimal>()
            .map_err(|e| ValidationError::InvalidAmount {
                value: value.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::new(parsed, currency))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

/// ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    /// Create a new currency from code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    /// Create a currency, rejecting anything that is not three ASCII letters.
    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        let trimmed = code.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCurrency(code.to_string()));
        }
        Ok(Self::new(trimmed))
    }

    /// Get the currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Common currencies
    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn eur() -> Self {
        Self::new("EUR")
    }

    pub fn gbp() -> Self {
        Self::new("GBP")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
