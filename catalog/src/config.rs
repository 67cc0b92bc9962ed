//! Catalog service configuration.

use pricewise_common::Currency;
use pricewise_fx::FxConfig;

/// Main catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Currency prices are supplied in.
    pub source_currency: Currency,
    /// Currency whose middle rate converts source prices into target prices.
    pub rate_currency: Currency,
    /// Page size used when the caller does not pick one.
    pub default_page_size: usize,
    /// Largest page size accepted by `list_items`.
    pub max_page_size: usize,
    /// Rate provider configuration.
    pub fx: FxConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source_currency: Currency::eur(),
            rate_currency: Currency::usd(),
            default_page_size: 20,
            max_page_size: 100,
            fx: FxConfig::default(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self {
            fx: FxConfig::from_env(),
            ..Self::default()
        };

        if let Ok(code) = std::env::var("CATALOG_SOURCE_CURRENCY") {
            if let Ok(currency) = Currency::parse(&code) {
                config.source_currency = currency;
            }
        }

        if let Ok(code) = std::env::var("CATALOG_RATE_CURRENCY") {
            if let Ok(currency) = Currency::parse(&code) {
                config.rate_currency = currency;
            }
        }

        if let Ok(size) = std::env::var("CATALOG_MAX_PAGE_SIZE") {
            if let Ok(size) = size.parse() {
                config.max_page_size = size;
            }
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.source_currency == self.rate_currency {
            return Err(format!(
                "Source and rate currency must differ, both are {}",
                self.source_currency
            ));
        }

        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err("Page sizes must be greater than 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            return Err("Default page size cannot exceed max page size".to_string());
        }

        self.fx.validate()
    }
}
