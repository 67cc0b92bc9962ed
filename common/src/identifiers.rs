//! Identifier types for catalog entities.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::ValidationError;

/// Required length of a catalog business code.
pub const BUSINESS_CODE_LEN: usize = 10;

/// Unique identifier for a catalog item.
/// Uses UUID v7 so identifiers sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Create a new item ID.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse from string.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| ValidationError::InvalidItemId(e.to_string()))
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-assigned business key of a catalog item.
///
/// Exactly ten characters long and unique across the catalog. Uniqueness is
/// enforced by the catalog service, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BusinessCode(String);

impl BusinessCode {
    /// Create a business code, validating its length.
    pub fn new(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into();
        let len = code.chars().count();
        if len != BUSINESS_CODE_LEN {
            return Err(ValidationError::InvalidBusinessCode {
                reason: format!("must be exactly {} characters, got {}", BUSINESS_CODE_LEN, len),
                code,
            });
        }
        if code.trim().is_empty() {
            return Err(ValidationError::InvalidBusinessCode {
                code,
                reason: "must not be blank".to_string(),
            });
        }
        Ok(Self(code))
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BusinessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for BusinessCode {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for BusinessCode {
    type Error = ValidationError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BusinessCode> for String {
    fn from(code: BusinessCode) -> Self {
        code.0
    }
}
