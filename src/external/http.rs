use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{ProviderError, ProviderRates, RateProvider};

/// HTTP client for the rate provider.
///
/// The provider exposes two endpoints: `GET {base}/rates` returning a map
/// of currency code to rate, and `GET {base}/metadata` returning the
/// table's timestamp and source label.
pub struct HttpRateProvider {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetadataResponse {
    last_updated: Option<String>,
    source: Option<String>,
}

impl HttpRateProvider {
    /// Build a provider client with its own request timeout. The timeout
    /// bounds every refresh attempt so a hung provider cannot stall the
    /// refresh loop.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    async fn fetch_rates(&self) -> Result<ProviderRates, ProviderError> {
        let url = format!("{}/rates", self.base_url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ProviderError::BadResponse(format!(
                "rates endpoint returned {}",
                resp.status()
            )));
        }

        let rates: HashMap<String, Decimal> = resp
            .json()
            .await
            .map_err(|e| ProviderError::BadResponse(e.to_string()))?;

        if rates.is_empty() {
            return Err(ProviderError::BadResponse(
                "rates endpoint returned an empty table".to_string(),
            ));
        }

        // Metadata is best-effort; a rate table without a timestamp is
        // still usable.
        let (last_updated, source) = match self.fetch_metadata().await {
            Ok(meta) => meta,
            Err(err) => {
                log::debug!("rate provider metadata unavailable: {err}");
                (None, None)
            }
        };

        Ok(ProviderRates {
            rates,
            last_updated,
            source,
        })
    }
}

impl HttpRateProvider {
    async fn fetch_metadata(
        &self,
    ) -> Result<(Option<chrono::NaiveDateTime>, Option<String>), ProviderError> {
        let url = format!("{}/metadata", self.base_url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ProviderError::BadResponse(format!(
                "metadata endpoint returned {}",
                resp.status()
            )));
        }

        let meta: MetadataResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::BadResponse(e.to_string()))?;

        let last_updated = meta
            .last_updated
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|parsed| parsed.naive_utc());

        Ok((last_updated, meta.source))
    }
}
