//! Daily rate records as published by the rate provider.
//!
//! Fields are kept in the provider's textual form. Decimal and date parsing
//! happens in the accessors so that malformed values surface where they are
//! used, not when the record is fetched.

use chrono::NaiveDate;
use pricewise_common::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{FxError, FxResult};

/// Date format used by the provider for `datum_primjene`.
pub const APPLICATION_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a decimal written with a comma as the fractional separator.
///
/// This is the only place that knows about the provider's locale.
pub fn parse_comma_decimal(field: &'static str, raw: Option<&str>) -> FxResult<Decimal> {
    let raw = raw.ok_or(FxError::MalformedRecord {
        field,
        value: String::new(),
    })?;
    let normalized = raw.trim().replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| FxError::MalformedRecord {
        field,
        value: raw.to_string(),
    })
}

/// One element of the provider's JSON array response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRecord {
    /// Sequence number of the published rate list.
    #[serde(rename = "broj_tecajnice", default)]
    pub list_number: Option<String>,
    /// Date the rate applies to, `YYYY-MM-DD`.
    #[serde(rename = "datum_primjene", default)]
    pub application_date: Option<String>,
    #[serde(rename = "drzava", default)]
    pub country: Option<String>,
    #[serde(rename = "drzava_iso", default)]
    pub country_iso: Option<String>,
    #[serde(rename = "kupovni_tecaj", default)]
    pub buying_rate: Option<String>,
    #[serde(rename = "prodajni_tecaj", default)]
    pub selling_rate: Option<String>,
    /// ISO 4217 numeric code.
    #[serde(rename = "sifra_valute", default)]
    pub currency_number: Option<String>,
    /// Middle rate, comma as decimal separator.
    #[serde(rename = "srednji_tecaj", default)]
    pub middle_rate: Option<String>,
    /// ISO 4217 alphabetic code.
    #[serde(rename = "valuta", default)]
    pub currency_code: Option<String>,
}

impl RateRecord {
    /// Minimal record carrying just what the cache decision needs.
    pub fn new(
        currency: &Currency,
        middle_rate: impl Into<String>,
        application_date: impl Into<String>,
    ) -> Self {
        Self {
            currency_code: Some(currency.code().to_string()),
            middle_rate: Some(middle_rate.into()),
            application_date: Some(application_date.into()),
            ..Default::default()
        }
    }

    /// Middle rate as a positive decimal.
    pub fn middle_rate(&self) -> FxResult<Decimal> {
        let rate = parse_comma_decimal("srednji_tecaj", self.middle_rate.as_deref())?;
        if rate <= Decimal::ZERO {
            return Err(FxError::MalformedRecord {
                field: "srednji_tecaj",
                value: rate.to_string(),
            });
        }
        Ok(rate)
    }

    /// Buying rate as a decimal.
    pub fn buying_rate(&self) -> FxResult<Decimal> {
        parse_comma_decimal("kupovni_tecaj", self.buying_rate.as_deref())
    }

    /// Selling rate as a decimal.
    pub fn selling_rate(&self) -> FxResult<Decimal> {
        parse_comma_decimal("prodajni_tecaj", self.selling_rate.as_deref())
    }

    /// Calendar date the rate is valid for.
    pub fn application_date(&self) -> FxResult<NaiveDate> {
        let raw = self
            .application_date
            .as_deref()
            .ok_or(FxError::MalformedRecord {
                field: "datum_primjene",
                value: String::new(),
            })?;
        NaiveDate::parse_from_str(raw.trim(), APPLICATION_DATE_FORMAT).map_err(|_| {
            FxError::MalformedRecord {
                field: "datum_primjene",
                value: raw.to_string(),
            }
        })
    }

    /// Alphabetic currency code, if present.
    pub fn currency(&self) -> Option<Currency> {
        self.currency_code
            .as_deref()
            .and_then(|code| Currency::parse(code).ok())
    }

    /// Whether the record is usable on `today`: the middle rate parses and the
    /// application date is not before `today`.
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.middle_rate().is_ok()
            && self
                .application_date()
                .map(|date| date >= today)
                .unwrap_or(false)
    }
}
