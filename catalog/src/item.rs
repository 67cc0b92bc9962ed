//! Catalog item definitions.

use chrono::{DateTime, Utc};
use pricewise_common::{
    fits_price_precision, round_half_up, BusinessCode, ItemId, MAX_PRICE_INTEGER_DIGITS,
    PRICE_SCALE,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult, FieldError};

/// A priced catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique item identifier.
    pub id: ItemId,
    /// Unique business code.
    pub code: BusinessCode,
    /// Display name.
    pub name: String,
    /// Price in the source currency.
    #[serde(with = "rust_decimal::serde::str")]
    pub price_source: Decimal,
    /// Price in the rate currency, derived at creation time.
    #[serde(with = "rust_decimal::serde::str")]
    pub price_target: Decimal,
    /// Whether the item can be sold.
    pub available: bool,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl CatalogItem {
    /// Compose a new item. Both prices are stored with two fractional digits
    /// and at most [`MAX_PRICE_INTEGER_DIGITS`] integer digits.
    pub fn new(
        code: BusinessCode,
        name: impl Into<String>,
        price_source: Decimal,
        price_target: Decimal,
        available: bool,
    ) -> CatalogResult<Self> {
        let (price_source, price_target) = match (
            stored_price("price_source", price_source),
            stored_price("price_target", price_target),
        ) {
            (Ok(source), Ok(target)) => (source, target),
            (source, target) => {
                let errors = [source.err(), target.err()].into_iter().flatten().collect();
                return Err(CatalogError::InvalidRequest(errors));
            }
        };
        let now = Utc::now();

        Ok(Self {
            id: ItemId::new(),
            code,
            name: name.into(),
            price_source,
            price_target,
            available,
            created_at: now,
            updated_at: now,
        })
    }
}

fn stored_price(field: &str, value: Decimal) -> Result<Decimal, FieldError> {
    round_half_up(value, PRICE_SCALE)
        .filter(|rounded| fits_price_precision(*rounded))
        .ok_or_else(|| too_many_integer_digits(field))
}

fn too_many_integer_digits(field: &str) -> FieldError {
    FieldError::new(
        field,
        format!("must have at most {} integer digits", MAX_PRICE_INTEGER_DIGITS),
    )
}

/// Caller-supplied fields for creating an item.
///
/// The target price is never accepted from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub code: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_source: Decimal,
    pub available: bool,
}

impl NewItem {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        price_source: Decimal,
        available: bool,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            price_source,
            available,
        }
    }

    /// Check every field, reporting all failures at once.
    pub fn validate(&self) -> CatalogResult<BusinessCode> {
        let mut errors = Vec::new();

        let code = match BusinessCode::new(self.code.clone()) {
            Ok(code) => Some(code),
            Err(e) => {
                errors.push(FieldError::new("code", e.to_string()));
                None
            }
        };

        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "must not be blank"));
        }

        if self.price_source < Decimal::ZERO {
            errors.push(FieldError::new("price_source", "must not be negative"));
        }

        if !fits_price_precision(self.price_source) {
            errors.push(too_many_integer_digits("price_source"));
        }

        if self.price_source.normalize().scale() > PRICE_SCALE {
            errors.push(FieldError::new(
                "price_source",
                format!("must have at most {} fractional digits", PRICE_SCALE),
            ));
        }

        match code {
            Some(code) if errors.is_empty() => Ok(code),
            _ => Err(CatalogError::InvalidRequest(errors)),
        }
    }
}
