//! Catalog error types.

use pricewise_common::{BusinessCode, Currency, ItemId};
use std::fmt;
use thiserror::Error;

/// A single rejected request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name as seen by the caller.
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors returned by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// One or more request fields are invalid.
    #[error("Invalid request: {}", join_fields(.0))]
    InvalidRequest(Vec<FieldError>),

    /// Business code already used by another item.
    #[error("Item with code {0} already exists")]
    DuplicateCode(BusinessCode),

    /// No usable exchange rate; the item was not created.
    #[error("Exchange rate for {0} is currently unavailable")]
    RateUnavailable(Currency),

    /// Item does not exist.
    #[error("Item {0} not found")]
    NotFound(ItemId),

    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CatalogError {
    /// Single-field validation failure.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::InvalidRequest(vec![FieldError::new(field, message)])
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::InvalidRequest(_) => "INVALID_REQUEST",
            CatalogError::DuplicateCode(_) => "DUPLICATE_CODE",
            CatalogError::RateUnavailable(_) => "RATE_UNAVAILABLE",
            CatalogError::NotFound(_) => "NOT_FOUND",
            CatalogError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// HTTP status an API layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::InvalidRequest(_) => 400,
            CatalogError::NotFound(_) => 404,
            CatalogError::DuplicateCode(_) => 409,
            CatalogError::Storage(_) => 500,
            CatalogError::RateUnavailable(_) => 503,
        }
    }

    /// Whether the same request may succeed later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::RateUnavailable(_) | CatalogError::Storage(_))
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let code = BusinessCode::new("ABC1234567").unwrap();
        assert_eq!(CatalogError::DuplicateCode(code).status_code(), 409);
        assert_eq!(CatalogError::RateUnavailable(Currency::usd()).status_code(), 503);
        assert_eq!(CatalogError::NotFound(ItemId::new()).status_code(), 404);
        assert_eq!(CatalogError::invalid("name", "required").status_code(), 400);
    }

    #[test]
    fn test_invalid_request_message_lists_fields() {
        let err = CatalogError::InvalidRequest(vec![
            FieldError::new("name", "must not be blank"),
            FieldError::new("code", "must be exactly 10 characters"),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid request: name: must not be blank; code: must be exactly 10 characters"
        );
    }

    #[test]
    fn test_retryable() {
        assert!(CatalogError::RateUnavailable(Currency::usd()).is_retryable());
        assert!(!CatalogError::NotFound(ItemId::new()).is_retryable());
    }
}
