//! Client for the external exchange-rate provider.
//!
//! The background refresh task is the only caller; resolution requests
//! never touch this module.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use thiserror::Error;

mod http;

pub use http::HttpRateProvider;

/// Errors surfaced while fetching rates from the provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure, including timeouts.
    #[error("network error: {0}")]
    Network(String),
    /// The provider answered with something we could not use.
    #[error("bad response: {0}")]
    BadResponse(String),
}

/// One fetched rate table plus provider metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderRates {
    /// Currency code mapped to its rate against the base currency.
    pub rates: HashMap<String, Decimal>,
    /// Provider-reported timestamp of the rate table, when available.
    pub last_updated: Option<NaiveDateTime>,
    /// Provider-reported source label, when available.
    pub source: Option<String>,
}

/// Source of exchange rates for the rate store refresh.
#[async_trait]
pub trait RateProvider {
    async fn fetch_rates(&self) -> Result<ProviderRates, ProviderError>;
}

#[cfg(test)]
mockall::mock! {
    pub RateProvider {}

    #[async_trait]
    impl RateProvider for RateProvider {
        async fn fetch_rates(&self) -> Result<ProviderRates, ProviderError>;
    }
}
