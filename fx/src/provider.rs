//! Rate provider trait and the HNB daily-rate client.

use async_trait::async_trait;
use pricewise_common::Currency;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::config::FxConfig;
use crate::error::{FxError, FxResult};
use crate::record::RateRecord;
use crate::transport::{HttpTransport, ReqwestTransport};

/// Query parameter selecting the currency on the HNB endpoint.
const CURRENCY_QUERY: &str = "valuta";

/// Headers asking the provider and any intermediary for an uncached answer.
const NO_CACHE_HEADERS: [(&str, &str); 2] = [
    ("cache-control", "no-cache"),
    ("pragma", "no-cache"),
];

/// Source of daily middle rates.
///
/// Each call performs exactly one outbound request and never retries.
/// Returned records are passed through untouched; validation is the
/// caller's job.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// The rate as the provider currently knows it. May reflect a value
    /// already served earlier that day.
    async fn fetch_cached(&self, currency: &Currency) -> FxResult<RateRecord>;

    /// The provider's authoritative current rate.
    async fn fetch_fresh(&self, currency: &Currency) -> FxResult<RateRecord>;
}

/// Client for the Croatian National Bank exchange-rate API (`tecajn/v3`).
pub struct HnbClient {
    transport: Arc<dyn HttpTransport>,
    api_url: String,
}

impl HnbClient {
    /// Create a client with a reqwest transport built from `config`.
    pub fn new(config: &FxConfig) -> FxResult<Self> {
        config.validate().map_err(FxError::Configuration)?;
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport), config.api_url.clone()))
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(transport: Arc<dyn HttpTransport>, api_url: impl Into<String>) -> Self {
        Self {
            transport,
            api_url: api_url.into(),
        }
    }

    /// URL selecting `currency` on the configured endpoint.
    pub fn request_url(&self, currency: &Currency) -> String {
        let separator = if self.api_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}={}",
            self.api_url,
            separator,
            CURRENCY_QUERY,
            currency.code()
        )
    }

    async fn fetch(&self, currency: &Currency, headers: &[(&str, &str)]) -> FxResult<RateRecord> {
        let url = self.request_url(currency);
        info!(url = %url, "Calling HNB API");

        let response = self.transport.get(&url, headers).await.map_err(|e| {
            warn!(currency = %currency, error = %e, "HNB request failed");
            e
        })?;

        if !response.is_success() {
            warn!(currency = %currency, status = response.status, "HNB returned error status");
            return Err(FxError::UpstreamUnavailable(format!(
                "HTTP status {}",
                response.status
            )));
        }

        let records: Vec<RateRecord> = serde_json::from_str(&response.body).map_err(|e| {
            warn!(currency = %currency, error = %e, "HNB response is not a rate list");
            FxError::UpstreamUnavailable(format!("invalid response body: {}", e))
        })?;

        records
            .into_iter()
            .next()
            .ok_or_else(|| FxError::UpstreamEmptyResponse(currency.clone()))
    }
}

#[async_trait]
impl RateProvider for HnbClient {
    #[instrument(skip(self), fields(currency = %currency))]
    async fn fetch_cached(&self, currency: &Currency) -> FxResult<RateRecord> {
        info!("Getting exchange rate");
        self.fetch(currency, &[]).await
    }

    #[instrument(skip(self), fields(currency = %currency))]
    async fn fetch_fresh(&self, currency: &Currency) -> FxResult<RateRecord> {
        info!("Refreshing exchange rate");
        self.fetch(currency, &NO_CACHE_HEADERS).await
    }
}

/// Canned provider outcome used by [`MockRateProvider`].
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this record.
    Record(RateRecord),
    /// Fail as if the provider answered with `[]`.
    Empty,
    /// Fail as if the network or HTTP call failed.
    Unavailable,
}

/// Mock rate provider for testing. Counts calls per operation.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Default)]
pub struct MockRateProvider {
    cached: dashmap::DashMap<String, MockResponse>,
    fresh: dashmap::DashMap<String, MockResponse>,
    cached_calls: std::sync::atomic::AtomicUsize,
    fresh_calls: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockRateProvider {
    /// Create a new mock provider. Unset currencies answer `Empty`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outcome of `fetch_cached` for a currency.
    pub fn set_cached(&self, currency: &Currency, response: MockResponse) {
        self.cached.insert(currency.code().to_string(), response);
    }

    /// Set the outcome of `fetch_fresh` for a currency.
    pub fn set_fresh(&self, currency: &Currency, response: MockResponse) {
        self.fresh.insert(currency.code().to_string(), response);
    }

    /// Number of `fetch_cached` calls so far.
    pub fn cached_calls(&self) -> usize {
        self.cached_calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Number of `fetch_fresh` calls so far.
    pub fn fresh_calls(&self) -> usize {
        self.fresh_calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Total outbound calls so far.
    pub fn total_calls(&self) -> usize {
        self.cached_calls() + self.fresh_calls()
    }

    fn answer(
        responses: &dashmap::DashMap<String, MockResponse>,
        currency: &Currency,
    ) -> FxResult<RateRecord> {
        let response = responses
            .get(currency.code())
            .map(|r| r.clone())
            .unwrap_or(MockResponse::Empty);
        match response {
            MockResponse::Record(record) => Ok(record),
            MockResponse::Empty => Err(FxError::UpstreamEmptyResponse(currency.clone())),
            MockResponse::Unavailable => {
                Err(FxError::UpstreamUnavailable("mock transport down".to_string()))
            }
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl RateProvider for MockRateProvider {
    async fn fetch_cached(&self, currency: &Currency) -> FxResult<RateRecord> {
        self.cached_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Self::answer(&self.cached, currency)
    }

    async fn fetch_fresh(&self, currency: &Currency) -> FxResult<RateRecord> {
        self.fresh_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Self::answer(&self.fresh, currency)
    }
}
