//! Pricewise FX
//!
//! Daily exchange-rate acquisition and price conversion.
//!
//! # Components
//!
//! - [`RateProvider`]: one outbound request per call, cached or forced-fresh
//! - [`ExchangeRateCache`]: decides whether the provider's cached rate is
//!   still valid for today and refreshes it when it is not
//! - [`PricingEngine`]: pure `amount * rate` conversion with half-up rounding
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pricewise_common::{system_clock, Currency};
//! use pricewise_fx::{ExchangeRateCache, FxConfig, HnbClient, PricingEngine};
//!
//! let provider = Arc::new(HnbClient::new(&FxConfig::from_env())?);
//! let cache = ExchangeRateCache::new(provider, system_clock());
//!
//! let rate = cache.get_middle_rate(&Currency::usd()).await?;
//! let usd = PricingEngine::new().convert(dec!(9.99), rate)?;
//! ```

pub mod cache;
pub mod config;
pub mod conversion;
pub mod engine;
pub mod error;
pub mod provider;
pub mod record;
pub mod transport;

pub use cache::{CacheStats, ExchangeRateCache, RateState, SharedRateCache};
pub use config::FxConfig;
pub use conversion::{Conversion, ConversionRequest};
pub use engine::PricingEngine;
pub use error::{FxError, FxResult};
pub use provider::{HnbClient, RateProvider};
pub use record::RateRecord;
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};

#[cfg(any(test, feature = "test-utils"))]
pub use provider::{MockRateProvider, MockResponse};
