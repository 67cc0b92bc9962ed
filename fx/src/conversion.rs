//! Currency conversion types.

use chrono::{DateTime, Utc};
use pricewise_common::{fits_price_precision, Money, MAX_PRICE_INTEGER_DIGITS, PRICE_SCALE};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{FxError, FxResult};

/// Validated input to a price conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Amount in the source currency, at most two fractional digits.
    pub source_amount: Decimal,
    /// Middle rate to apply.
    pub rate: Decimal,
}

impl ConversionRequest {
    /// Create a conversion request, rejecting non-positive values and
    /// amounts finer than a cent or wider than a stored price.
    pub fn new(source_amount: Decimal, rate: Decimal) -> FxResult<Self> {
        if source_amount <= Decimal::ZERO {
            return Err(FxError::InvalidConversion(format!(
                "source amount must be positive, got {}",
                source_amount
            )));
        }

        if source_amount.normalize().scale() > PRICE_SCALE {
            return Err(FxError::InvalidConversion(format!(
                "source amount {} has more than {} fractional digits",
                source_amount, PRICE_SCALE
            )));
        }

        if !fits_price_precision(source_amount) {
            return Err(FxError::InvalidConversion(format!(
                "source amount {} has more than {} integer digits",
                source_amount, MAX_PRICE_INTEGER_DIGITS
            )));
        }

        if rate <= Decimal::ZERO {
            return Err(FxError::InvalidConversion(format!(
                "rate must be positive, got {}",
                rate
            )));
        }

        Ok(Self {
            source_amount,
            rate,
        })
    }
}

/// Represents a completed currency conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    /// Input amount.
    pub input: Money,
    /// Output amount.
    pub output: Money,
    /// Rate used for conversion.
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    /// When the conversion was executed.
    pub executed_at: DateTime<Utc>,
}

impl Conversion {
    /// Create a new conversion record.
    pub fn new(input: Money, output: Money, rate: Decimal) -> Self {
        Self {
            input,
            output,
            rate,
            executed_at: Utc::now(),
        }
    }
}
