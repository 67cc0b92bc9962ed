//! Validation errors for shared value types.

use thiserror::Error;

/// Errors raised when constructing a shared value type from untrusted input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Currency code is not three ASCII letters.
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),

    /// Business code does not satisfy the catalog format.
    #[error("Invalid business code {code:?}: {reason}")]
    InvalidBusinessCode { code: String, reason: String },

    /// Item identifier could not be parsed.
    #[error("Invalid item id: {0}")]
    InvalidItemId(String),

    /// Monetary amount could not be parsed.
    #[error("Invalid amount {value:?}: {reason}")]
    InvalidAmount { value: String, reason: String },
}

impl ValidationError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidCurrency(_) => "INVALID_CURRENCY",
            ValidationError::InvalidBusinessCode { .. } => "INVALID_BUSINESS_CODE",
            ValidationError::InvalidItemId(_) => "INVALID_ITEM_ID",
            ValidationError::InvalidAmount { .. } => "INVALID_AMOUNT",
        }
    }
}
