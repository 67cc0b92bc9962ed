//! Price conversion with deterministic half-up rounding.

use pricewise_common::{round_half_up, Currency, Money, PRICE_SCALE};
use rust_decimal::Decimal;
use tracing::debug;

use crate::conversion::{Conversion, ConversionRequest};
use crate::error::{FxError, FxResult};

/// Stateless converter from a source price to a target price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricingEngine;

impl PricingEngine {
    /// Engine rounding to catalog price precision.
    pub const fn new() -> Self {
        Self
    }

    /// `round(amount * rate)` half-up to [`PRICE_SCALE`]. The result always
    /// carries exactly that many fractional digits.
    ///
    /// Fails with [`FxError::ConversionOverflow`] when the product does not
    /// fit a decimal or cannot be held at price precision.
    pub fn convert(&self, source_amount: Decimal, rate: Decimal) -> FxResult<Decimal> {
        let product = source_amount.checked_mul(rate).ok_or_else(|| {
            FxError::ConversionOverflow(format!("{} * {} overflows", source_amount, rate))
        })?;

        round_half_up(product, PRICE_SCALE).ok_or_else(|| {
            FxError::ConversionOverflow(format!(
                "{} has too many integer digits for {} decimal places",
                product, PRICE_SCALE
            ))
        })
    }

    /// Convert a validated request.
    pub fn apply(&self, request: &ConversionRequest) -> FxResult<Decimal> {
        self.convert(request.source_amount, request.rate)
    }

    /// Convert `amount` into `target` at `rate`, keeping a record of the inputs.
    pub fn convert_money(
        &self,
        amount: &Money,
        rate: Decimal,
        target: Currency,
    ) -> FxResult<Conversion> {
        let request = ConversionRequest::new(amount.value, rate)?;
        let output = Money::new(self.apply(&request)?, target);

        debug!(
            input = %amount,
            output = %output,
            rate = %rate,
            "Converted amount"
        );

        Ok(Conversion::new(amount.clone(), output, rate))
    }
}
