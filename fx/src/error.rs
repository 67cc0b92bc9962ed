//! FX error types.

use pricewise_common::Currency;
use thiserror::Error;

/// Errors that can occur while acquiring or applying exchange rates.
#[derive(Debug, Error)]
pub enum FxError {
    /// Network failure, timeout, non-2xx status or undecodable body.
    #[error("Rate provider unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Provider answered with an empty record list.
    #[error("Rate provider returned no records for {0}")]
    UpstreamEmptyResponse(Currency),

    /// A record field is missing or cannot be parsed.
    #[error("Malformed rate record field {field}: {value:?}")]
    MalformedRecord { field: &'static str, value: String },

    /// No usable rate could be obtained, cached or refreshed.
    #[error("Exchange rate unavailable for {0}")]
    RateUnavailable(Currency),

    /// Conversion input outside the accepted domain.
    #[error("Invalid conversion input: {0}")]
    InvalidConversion(String),

    /// The converted amount cannot be represented at price precision.
    #[error("Converted amount out of range: {0}")]
    ConversionOverflow(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl FxError {
    /// Whether the error originated at the provider transport.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            FxError::UpstreamUnavailable(_) | FxError::UpstreamEmptyResponse(_)
        )
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            FxError::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            FxError::UpstreamEmptyResponse(_) => "UPSTREAM_EMPTY_RESPONSE",
            FxError::MalformedRecord { .. } => "MALFORMED_RATE_RECORD",
            FxError::RateUnavailable(_) => "RATE_UNAVAILABLE",
            FxError::InvalidConversion(_) => "INVALID_CONVERSION",
            FxError::ConversionOverflow(_) => "CONVERSION_OVERFLOW",
            FxError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

/// Result type for FX operations.
pub type FxResult<T> = Result<T, FxError>;
