//! Catalog service: item creation with converted pricing, lookup and listing.

use std::sync::Arc;

use pricewise_common::ItemId;
use pricewise_fx::{FxError, PricingEngine, SharedRateCache};
use tracing::{info, instrument, warn};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::item::{CatalogItem, NewItem};
use crate::page::{Page, PageRequest};
use crate::repository::CatalogRepository;

/// Orchestrates storage and the rate pipeline for catalog items.
pub struct CatalogService {
    repository: Arc<dyn CatalogRepository>,
    rates: SharedRateCache,
    engine: PricingEngine,
    config: CatalogConfig,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(
        repository: Arc<dyn CatalogRepository>,
        rates: SharedRateCache,
        config: CatalogConfig,
    ) -> Self {
        Self {
            repository,
            rates,
            engine: PricingEngine::new(),
            config,
        }
    }

    /// Create an item, deriving its target price from today's middle rate.
    ///
    /// Validation and the duplicate check both run before any rate lookup.
    #[instrument(skip(self, new_item), fields(code = %new_item.code))]
    pub async fn create_item(&self, new_item: NewItem) -> CatalogResult<CatalogItem> {
        info!(name = %new_item.name, price = %new_item.price_source, "Creating item");

        let code = new_item.validate()?;

        if self.repository.exists_by_code(&code).await? {
            warn!("Item code already exists");
            return Err(CatalogError::DuplicateCode(code));
        }

        let rate = self
            .rates
            .get_middle_rate(&self.config.rate_currency)
            .await
            .map_err(|e| match e {
                FxError::RateUnavailable(currency) => CatalogError::RateUnavailable(currency),
                other => {
                    warn!(error = %other, "Unexpected rate pipeline error");
                    CatalogError::RateUnavailable(self.config.rate_currency.clone())
                }
            })?;

        let price_target = self
            .engine
            .convert(new_item.price_source, rate)
            .map_err(|e| {
                warn!(error = %e, rate = %rate, "Converted price out of range");
                CatalogError::invalid("price_target", e.to_string())
            })?;

        let item = CatalogItem::new(
            code,
            new_item.name,
            new_item.price_source,
            price_target,
            new_item.available,
        )?;
        let stored = self.repository.insert(item).await?;

        info!(
            item_id = %stored.id,
            price_source = %stored.price_source,
            price_target = %stored.price_target,
            rate = %rate,
            "Item saved"
        );

        Ok(stored)
    }

    /// Get an item by id.
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: ItemId) -> CatalogResult<CatalogItem> {
        info!("Fetching item");
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// One page of items in storage order.
    #[instrument(skip(self))]
    pub async fn list_items(
        &self,
        page_index: usize,
        page_size: usize,
    ) -> CatalogResult<Page<CatalogItem>> {
        if page_size > self.config.max_page_size {
            return Err(CatalogError::invalid(
                "size",
                format!("page size must not exceed {}", self.config.max_page_size),
            ));
        }

        let request = PageRequest::new(page_index, page_size)?;
        let page = self.repository.find_page(request).await?;

        info!(returned = page.items.len(), total = page.total_items, "Fetched items");
        Ok(page)
    }

    /// First page using the configured default size.
    pub async fn list_first_page(&self) -> CatalogResult<Page<CatalogItem>> {
        self.list_items(0, self.config.default_page_size).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryCatalogRepository;
    use chrono::NaiveDate;
    use pricewise_common::{Currency, FixedClock};
    use pricewise_fx::{ExchangeRateCache, MockRateProvider, MockResponse, RateRecord};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tokio_test::assert_ok;

    const TODAY: &str = "2025-10-06";

    fn setup(rate: Option<&str>) -> (Arc<MockRateProvider>, CatalogService) {
        let provider = Arc::new(MockRateProvider::new());
        let usd = Currency::usd();
        match rate {
            Some(rate) => {
                provider.set_cached(&usd, MockResponse::Record(RateRecord::new(&usd, rate, TODAY)))
            }
            None => {
                provider.set_cached(&usd, MockResponse::Unavailable);
                provider.set_fresh(&usd, MockResponse::Unavailable);
            }
        }

        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2025, 10, 6).unwrap()));
        let rates = Arc::new(ExchangeRateCache::new(provider.clone(), clock));
        let service = CatalogService::new(
            Arc::new(InMemoryCatalogRepository::new()),
            rates,
            CatalogConfig::default(),
        );
        (provider, service)
    }

    #[tokio::test]
    async fn test_create_item_converts_price() {
        let (_, service) = setup(Some("7,5"));

        let item = assert_ok!(
            service
                .create_item(NewItem::new("ABC1234567", "Laptop", dec!(10.00), true))
                .await
        );

        assert_eq!(item.price_target, dec!(75.00));
        assert_eq!(item.price_target.to_string(), "75.00");
        assert!(item.available);
    }

    #[tokio::test]
    async fn test_create_item_rounds_half_up() {
        let (_, service) = setup(Some("1,2345"));

        let item = service
            .create_item(NewItem::new("ABC1234567", "Mouse", dec!(10.01), false))
            .await
            .unwrap();

        // 10.01 * 1.2345 = 12.357345
        assert_eq!(item.price_target, dec!(12.36));
    }

    #[tokio::test]
    async fn test_duplicate_code_skips_rate_pipeline() {
        let (provider, service) = setup(Some("7,5"));
        service
            .create_item(NewItem::new("ABC1234567", "Laptop", dec!(10.00), true))
            .await
            .unwrap();
        let calls_before = provider.total_calls();

        let result = service
            .create_item(NewItem::new("ABC1234567", "Other", dec!(5.00), true))
            .await;

        assert!(matches!(result, Err(CatalogError::DuplicateCode(_))));
        assert_eq!(provider.total_calls(), calls_before);
    }

    #[tokio::test]
    async fn test_invalid_request_skips_rate_pipeline() {
        let (provider, service) = setup(Some("7,5"));

        let result = service
            .create_item(NewItem::new("ABC", "", dec!(1.00), true))
            .await;

        assert!(matches!(result, Err(CatalogError::InvalidRequest(ref e)) if e.len() == 2));
        assert_eq!(provider.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_price_with_eighteen_integer_digits_is_rejected() {
        let (provider, service) = setup(Some("7,5"));

        for price in [dec!(100000000000000000), Decimal::MAX] {
            let result = service
                .create_item(NewItem::new("ABC1234567", "Yacht", price, true))
                .await;

            assert!(matches!(
                result,
                Err(CatalogError::InvalidRequest(ref e)) if e[0].field == "price_source"
            ));
        }
        assert_eq!(provider.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_widest_price_keeps_two_decimals() {
        let (_, service) = setup(Some("1,0000"));

        let item = service
            .create_item(NewItem::new("ABC1234567", "Yacht", dec!(99999999999999999.99), true))
            .await
            .unwrap();

        assert_eq!(item.price_source.scale(), 2);
        assert_eq!(item.price_target.scale(), 2);
        assert_eq!(item.price_target.to_string(), "99999999999999999.99");
    }

    #[tokio::test]
    async fn test_converted_price_wider_than_storage_creates_nothing() {
        let (_, service) = setup(Some("7,5"));

        let result = service
            .create_item(NewItem::new("ABC1234567", "Yacht", dec!(99999999999999999.99), true))
            .await;

        assert!(matches!(
            result,
            Err(CatalogError::InvalidRequest(ref e)) if e[0].field == "price_target"
        ));
        assert_eq!(service.list_first_page().await.unwrap().total_items, 0);
    }

    #[tokio::test]
    async fn test_rate_unavailable_creates_nothing() {
        let (_, service) = setup(None);

        let result = service
            .create_item(NewItem::new("ABC1234567", "Laptop", dec!(10.00), true))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, CatalogError::RateUnavailable(ref c) if *c == Currency::usd()));
        assert_eq!(err.status_code(), 503);
        assert_eq!(service.list_first_page().await.unwrap().total_items, 0);
    }

    #[tokio::test]
    async fn test_get_item() {
        let (_, service) = setup(Some("7,5"));
        let created = service
            .create_item(NewItem::new("ABC1234567", "Laptop", dec!(10.00), true))
            .await
            .unwrap();

        assert_eq!(service.get_item(created.id).await.unwrap(), created);

        let missing = ItemId::new();
        assert!(matches!(
            service.get_item(missing).await,
            Err(CatalogError::NotFound(id)) if id == missing
        ));
    }

    #[tokio::test]
    async fn test_list_items_validates_page_size() {
        let (_, service) = setup(Some("7,5"));

        assert!(matches!(
            service.list_items(0, 0).await,
            Err(CatalogError::InvalidRequest(_))
        ));
        assert!(matches!(
            service.list_items(0, 101).await,
            Err(CatalogError::InvalidRequest(_))
        ));
        assert!(service.list_items(0, 100).await.unwrap().is_empty());
    }
}
