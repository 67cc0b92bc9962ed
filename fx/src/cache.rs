//! Staleness-gated exchange-rate cache.
//!
//! Every read first asks the provider for its cached value. A record that
//! parses and applies to today (or later) is used as is; anything else
//! (provider failure, unparsable rate, past date) forces exactly one fresh
//! fetch. Transport errors never escape: callers only ever see
//! [`FxError::RateUnavailable`].
//!
//! There is no background refresh. Concurrent readers of an equally stale
//! rate may each issue a fresh fetch; the per-currency slot is updated
//! atomically so the last observed record always wins.
//!
//! The slot is observational. It backs [`ExchangeRateCache::state`] and
//! [`ExchangeRateCache::last_record`] but is never consulted when deciding
//! whether to refresh, and a `Fresh` slot never spares the provider call.

use chrono::NaiveDate;
use dashmap::DashMap;
use pricewise_common::{Currency, SharedClock};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::error::{FxError, FxResult};
use crate::provider::RateProvider;
use crate::record::RateRecord;

/// Logical state of one currency slot relative to a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateState {
    /// Never fetched.
    Empty,
    /// Holds a parseable record dated today or later.
    Fresh,
    /// Holds a record dated before today, or one whose rate fails to parse.
    Stale,
}

impl RateState {
    /// Classify an observed record against `today`.
    pub fn of(record: &RateRecord, today: NaiveDate) -> Self {
        if record.is_current(today) {
            RateState::Fresh
        } else {
            RateState::Stale
        }
    }
}

/// Cache decision counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads answered by the provider's cached value.
    pub cached_hits: u64,
    /// Reads that needed a forced refresh.
    pub refreshes: u64,
    /// Reads that ended in `RateUnavailable`.
    pub failures: u64,
}

#[derive(Debug, Default)]
struct Counters {
    cached_hits: AtomicU64,
    refreshes: AtomicU64,
    failures: AtomicU64,
}

/// Exchange-rate cache with lazy, per-call staleness checks.
pub struct ExchangeRateCache {
    provider: Arc<dyn RateProvider>,
    clock: SharedClock,
    slots: DashMap<Currency, RateRecord>,
    counters: Counters,
}

impl ExchangeRateCache {
    /// Create a cache over `provider`, judging staleness with `clock`.
    pub fn new(provider: Arc<dyn RateProvider>, clock: SharedClock) -> Self {
        Self {
            provider,
            clock,
            slots: DashMap::new(),
            counters: Counters::default(),
        }
    }

    /// Current middle rate for `currency`.
    ///
    /// The cached fetch and the conditional fresh fetch are strictly
    /// sequential; the fresh fetch is only issued once the cached record has
    /// been judged unusable.
    #[instrument(skip(self), fields(currency = %currency))]
    pub async fn get_middle_rate(&self, currency: &Currency) -> FxResult<Decimal> {
        let today = self.clock.today();

        match self.provider.fetch_cached(currency).await {
            Ok(record) => {
                let state = RateState::of(&record, today);
                let rate = record.middle_rate();
                self.slots.insert(currency.clone(), record);

                if state == RateState::Fresh {
                    if let Ok(rate) = rate {
                        debug!(rate = %rate, "Cached rate is current");
                        self.counters.cached_hits.fetch_add(1, Ordering::Relaxed);
                        return Ok(rate);
                    }
                }
                info!("Cached rate is missing or stale, refreshing");
            }
            Err(e) => {
                info!(error = %e, "No usable cached rate, refreshing");
            }
        }

        self.refresh(currency).await
    }

    async fn refresh(&self, currency: &Currency) -> FxResult<Decimal> {
        self.counters.refreshes.fetch_add(1, Ordering::Relaxed);

        let record = match self.provider.fetch_fresh(currency).await {
            Ok(record) => record,
            Err(e) => return Err(self.unavailable(currency, &e)),
        };

        let rate = record.middle_rate();
        self.slots.insert(currency.clone(), record);

        match rate {
            Ok(rate) => {
                info!(rate = %rate, "Exchange rate refreshed");
                Ok(rate)
            }
            Err(e) => Err(self.unavailable(currency, &e)),
        }
    }

    fn unavailable(&self, currency: &Currency, cause: &FxError) -> FxError {
        error!(currency = %currency, error = %cause, "Failed to obtain exchange rate");
        self.counters.failures.fetch_add(1, Ordering::Relaxed);
        FxError::RateUnavailable(currency.clone())
    }

    /// State of the slot for `currency` as of today.
    pub fn state(&self, currency: &Currency) -> RateState {
        let today = self.clock.today();
        self.slots
            .get(currency)
            .map(|record| RateState::of(&record, today))
            .unwrap_or(RateState::Empty)
    }

    /// Most recently observed record for `currency`.
    pub fn last_record(&self, currency: &Currency) -> Option<RateRecord> {
        self.slots.get(currency).map(|r| r.clone())
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            cached_hits: self.counters.cached_hits.load(Ordering::Relaxed),
            refreshes: self.counters.refreshes.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
        }
    }
}

/// Shared exchange-rate cache.
pub type SharedRateCache = Arc<ExchangeRateCache>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MockRateProvider, MockResponse};
    use pricewise_common::FixedClock;
    use rust_decimal_macros::dec;
    use tokio_test::{assert_err, assert_ok};

    const TODAY: &str = "2025-10-06";
    const YESTERDAY: &str = "2025-10-05";
    const TOMORROW: &str = "2025-10-07";

    fn setup() -> (Arc<MockRateProvider>, ExchangeRateCache) {
        let provider = Arc::new(MockRateProvider::new());
        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2025, 10, 6).unwrap()));
        let cache = ExchangeRateCache::new(provider.clone(), clock);
        (provider, cache)
    }

    fn record(rate: &str, date: &str) -> MockResponse {
        MockResponse::Record(RateRecord::new(&Currency::usd(), rate, date))
    }

    #[tokio::test]
    async fn test_current_cached_rate_skips_refresh() {
        let (provider, cache) = setup();
        let usd = Currency::usd();
        provider.set_cached(&usd, record("7,5", TODAY));

        let rate = assert_ok!(cache.get_middle_rate(&usd).await);

        assert_eq!(rate, dec!(7.5));
        assert_eq!(provider.cached_calls(), 1);
        assert_eq!(provider.fresh_calls(), 0);
        assert_eq!(cache.state(&usd), RateState::Fresh);
    }

    #[tokio::test]
    async fn test_future_dated_rate_is_accepted() {
        let (provider, cache) = setup();
        let usd = Currency::usd();
        provider.set_cached(&usd, record("1,1688", TOMORROW));

        assert_eq!(cache.get_middle_rate(&usd).await.unwrap(), dec!(1.1688));
        assert_eq!(provider.total_calls(), 1);
    }

    #[tokio::test]
    async fn test_stale_rate_forces_refresh() {
        let (provider, cache) = setup();
        let usd = Currency::usd();
        provider.set_cached(&usd, record("7,4", YESTERDAY));
        provider.set_fresh(&usd, record("7,5", TODAY));

        let rate = cache.get_middle_rate(&usd).await.unwrap();

        assert_eq!(rate, dec!(7.5));
        assert_eq!(provider.cached_calls(), 1);
        assert_eq!(provider.fresh_calls(), 1);
        assert_eq!(cache.state(&usd), RateState::Fresh);
        assert_eq!(
            cache.last_record(&usd).unwrap().middle_rate.as_deref(),
            Some("7,5")
        );
    }

    #[tokio::test]
    async fn test_refreshed_rate_is_used_even_if_still_dated_yesterday() {
        // Before the day's publication the authoritative rate is yesterday's.
        let (provider, cache) = setup();
        let usd = Currency::usd();
        provider.set_cached(&usd, record("7,4", YESTERDAY));
        provider.set_fresh(&usd, record("7,45", YESTERDAY));

        assert_eq!(cache.get_middle_rate(&usd).await.unwrap(), dec!(7.45));
        assert_eq!(cache.state(&usd), RateState::Stale);
    }

    #[tokio::test]
    async fn test_unparsable_cached_rate_forces_refresh() {
        let (provider, cache) = setup();
        let usd = Currency::usd();
        provider.set_cached(&usd, record("n/a", TODAY));
        provider.set_fresh(&usd, record("7,5", TODAY));

        assert_eq!(cache.get_middle_rate(&usd).await.unwrap(), dec!(7.5));
        assert_eq!(provider.fresh_calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_cached_rate_forces_refresh() {
        let (provider, cache) = setup();
        let usd = Currency::usd();
        provider.set_cached(
            &usd,
            MockResponse::Record(RateRecord {
                middle_rate: None,
                ..RateRecord::new(&usd, "", TODAY)
            }),
        );
        provider.set_fresh(&usd, record("7,5", TODAY));

        assert_eq!(cache.get_middle_rate(&usd).await.unwrap(), dec!(7.5));
        assert_eq!(provider.total_calls(), 2);
    }

    #[tokio::test]
    async fn test_cached_fetch_failure_forces_refresh() {
        let (provider, cache) = setup();
        let usd = Currency::usd();
        provider.set_cached(&usd, MockResponse::Unavailable);
        provider.set_fresh(&usd, record("7,5", TODAY));

        assert_eq!(cache.get_middle_rate(&usd).await.unwrap(), dec!(7.5));
        assert_eq!(provider.total_calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_cached_response_forces_refresh() {
        let (provider, cache) = setup();
        let usd = Currency::usd();
        assert_eq!(cache.state(&usd), RateState::Empty);
        provider.set_fresh(&usd, record("7,5", TODAY));

        assert_eq!(cache.get_middle_rate(&usd).await.unwrap(), dec!(7.5));
        assert_eq!(provider.fresh_calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_is_rate_unavailable() {
        let (provider, cache) = setup();
        let usd = Currency::usd();
        provider.set_cached(&usd, record("7,4", YESTERDAY));
        provider.set_fresh(&usd, MockResponse::Unavailable);

        let err = assert_err!(cache.get_middle_rate(&usd).await);

        assert!(matches!(err, FxError::RateUnavailable(ref c) if *c == usd));
        assert!(!err.is_upstream());
        assert_eq!(cache.stats().failures, 1);
    }

    #[tokio::test]
    async fn test_both_fetches_empty_is_rate_unavailable() {
        let (provider, cache) = setup();
        let usd = Currency::usd();

        let result = cache.get_middle_rate(&usd).await;

        assert!(matches!(result, Err(FxError::RateUnavailable(_))));
        assert_eq!(provider.total_calls(), 2);
    }

    #[tokio::test]
    async fn test_unparsable_refresh_is_rate_unavailable() {
        let (provider, cache) = setup();
        let usd = Currency::usd();
        provider.set_cached(&usd, record("garbage", TODAY));
        provider.set_fresh(&usd, record("still garbage", TODAY));

        let result = cache.get_middle_rate(&usd).await;

        assert!(matches!(result, Err(FxError::RateUnavailable(_))));
        assert_eq!(cache.state(&usd), RateState::Stale);
    }

    #[tokio::test]
    async fn test_each_read_consults_provider() {
        let (provider, cache) = setup();
        let usd = Currency::usd();
        provider.set_cached(&usd, record("7,5", TODAY));

        for _ in 0..3 {
            cache.get_middle_rate(&usd).await.unwrap();
        }

        assert_eq!(provider.cached_calls(), 3);
        assert_eq!(provider.fresh_calls(), 0);
        assert_eq!(
            cache.stats(),
            CacheStats {
                cached_hits: 3,
                refreshes: 0,
                failures: 0
            }
        );
    }

    #[tokio::test]
    async fn test_slots_are_per_currency() {
        let (provider, cache) = setup();
        let usd = Currency::usd();
        let gbp = Currency::gbp();
        provider.set_cached(&usd, record("1,17", TODAY));
        provider.set_cached(
            &gbp,
            MockResponse::Record(RateRecord::new(&gbp, "0,87", YESTERDAY)),
        );
        provider.set_fresh(
            &gbp,
            MockResponse::Record(RateRecord::new(&gbp, "0,88", TODAY)),
        );

        assert_eq!(cache.get_middle_rate(&usd).await.unwrap(), dec!(1.17));
        assert_eq!(cache.get_middle_rate(&gbp).await.unwrap(), dec!(0.88));
        assert_eq!(provider.fresh_calls(), 1);
        assert_eq!(cache.state(&Currency::new("CHF")), RateState::Empty);
    }

    #[tokio::test]
    async fn test_fresh_slot_never_short_circuits_provider() {
        let (provider, cache) = setup();
        let usd = Currency::usd();
        provider.set_cached(&usd, record("7,5", TODAY));
        cache.get_middle_rate(&usd).await.unwrap();
        assert_eq!(cache.state(&usd), RateState::Fresh);

        provider.set_cached(&usd, MockResponse::Unavailable);
        provider.set_fresh(&usd, record("7,6", TODAY));

        assert_eq!(cache.get_middle_rate(&usd).await.unwrap(), dec!(7.6));
        assert_eq!(provider.cached_calls(), 2);
        assert_eq!(provider.fresh_calls(), 1);
    }
}
