//! In-memory exchange-rate store.
//!
//! One background task refreshes rates from the external provider; any
//! number of concurrent resolution calls read immutable snapshots. The
//! shared state is a single `Arc<RateSnapshot>` replaced wholesale on
//! refresh, so readers can never observe a half-updated rate table.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDateTime, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::currency::{NewCurrencyRate, RateSnapshot};
use crate::external::{ProviderError, RateProvider};
use crate::repository::errors::RepositoryError;
use crate::repository::{CurrencyReader, CurrencyWriter};

/// Holds the active rate snapshot and the health of the refresh job.
pub struct RateStore {
    base: String,
    snapshot: RwLock<Arc<RateSnapshot>>,
    status: RwLock<RefreshStatus>,
}

#[derive(Debug, Default)]
struct RefreshStatus {
    last_success: Option<NaiveDateTime>,
    last_error: Option<String>,
}

/// Snapshot of the store's health, reported by the service health check.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RateStoreHealth {
    /// False when the most recent refresh attempt failed.
    pub healthy: bool,
    /// Code of the base currency.
    pub base_currency: String,
    /// Number of currencies in the active snapshot, the base included.
    pub known_currencies: usize,
    /// When the active snapshot was captured.
    pub snapshot_captured_at: NaiveDateTime,
    /// Timestamp of the last successful refresh, if any.
    pub last_refresh_success: Option<NaiveDateTime>,
    /// Seconds elapsed since the last successful refresh.
    pub seconds_since_success: Option<i64>,
    /// Message of the most recent failure, cleared on success.
    pub last_refresh_error: Option<String>,
}

impl RateStore {
    /// Create a store serving `initial` until the first refresh lands.
    pub fn new(initial: RateSnapshot) -> Self {
        Self {
            base: initial.base().to_string(),
            snapshot: RwLock::new(Arc::new(initial)),
            status: RwLock::new(RefreshStatus::default()),
        }
    }

    /// Warm-start from the persisted currency table. An empty table yields
    /// a base-only snapshot; refresh fills it in later.
    pub fn seed<R>(repo: &R, base: &str) -> Result<Self, RepositoryError>
    where
        R: CurrencyReader + ?Sized,
    {
        let currencies = repo.list_currencies()?;
        let captured_at = currencies
            .iter()
            .map(|currency| currency.updated_at)
            .max()
            .unwrap_or_else(|| Utc::now().naive_utc());

        let rates: HashMap<String, Decimal> = currencies
            .into_iter()
            .filter(|currency| currency.rate > Decimal::ZERO)
            .map(|currency| (currency.code, currency.rate))
            .collect();

        Ok(Self::new(RateSnapshot::new(base, rates, captured_at)))
    }

    /// Code of the base currency.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The active snapshot. Cheap Arc clone, no I/O, no await points.
    pub fn current_snapshot(&self) -> Arc<RateSnapshot> {
        self.snapshot.read().clone()
    }

    /// Replace the active snapshot. The refresh task is the only caller;
    /// in-flight readers keep whatever Arc they already cloned.
    pub fn install(&self, snapshot: RateSnapshot) {
        *self.snapshot.write() = Arc::new(snapshot);
    }

    /// Fetch fresh rates, persist them for warm starts, and swap the
    /// snapshot. On any failure the previous snapshot stays in place and
    /// only the health signal degrades.
    pub async fn refresh<P, R>(&self, provider: &P, repo: &R) -> Result<(), ProviderError>
    where
        P: RateProvider + ?Sized,
        R: CurrencyWriter + ?Sized,
    {
        let fetched = match provider.fetch_rates().await {
            Ok(fetched) => fetched,
            Err(err) => {
                self.record_failure(&err);
                return Err(err);
            }
        };

        let mut rates: HashMap<String, Decimal> = HashMap::new();
        for (code, rate) in fetched.rates {
            if rate <= Decimal::ZERO {
                log::warn!("ignoring non-positive rate {rate} for currency {code}");
                continue;
            }
            rates.insert(code.trim().to_uppercase(), rate);
        }

        if rates.is_empty() {
            let err = ProviderError::BadResponse("no usable rates in response".to_string());
            self.record_failure(&err);
            return Err(err);
        }

        let now = Utc::now().naive_utc();
        let captured_at = fetched.last_updated.unwrap_or(now);
        let snapshot = RateSnapshot::new(&self.base, rates, captured_at);

        let upserts: Vec<NewCurrencyRate> = snapshot
            .iter()
            .map(|(code, rate)| NewCurrencyRate::new(code, rate, code == self.base))
            .collect();

        // Persistence only matters for the next warm start; serving the
        // fresh snapshot takes precedence over a failed write.
        if let Err(err) = repo.upsert_rates(&upserts) {
            log::warn!("failed to persist refreshed rates: {err}");
        }

        self.install(snapshot);
        self.record_success(now);

        if let Some(source) = fetched.source {
            log::info!("refreshed exchange rates from {source}");
        }

        Ok(())
    }

    /// Current health of the refresh job and snapshot.
    pub fn health(&self) -> RateStoreHealth {
        let snapshot = self.current_snapshot();
        let status = self.status.read();
        let now = Utc::now().naive_utc();

        RateStoreHealth {
            healthy: status.last_error.is_none(),
            base_currency: self.base.clone(),
            known_currencies: snapshot.len(),
            snapshot_captured_at: snapshot.captured_at(),
            last_refresh_success: status.last_success,
            seconds_since_success: status
                .last_success
                .map(|success| (now - success).num_seconds()),
            last_refresh_error: status.last_error.clone(),
        }
    }

    fn record_success(&self, at: NaiveDateTime) {
        let mut status = self.status.write();
        status.last_success = Some(at);
        status.last_error = None;
    }

    fn record_failure(&self, err: &ProviderError) {
        let mut status = self.status.write();
        status.last_error = Some(err.to_string());
    }
}

/// Drive `refresh` on a fixed interval until the task is dropped.
///
/// The first tick fires immediately so a freshly started service does not
/// wait one full period for usable rates.
pub async fn run_refresh_loop<P, R>(store: Arc<RateStore>, provider: P, repo: R, period: Duration)
where
    P: RateProvider,
    R: CurrencyWriter,
{
    let mut interval = actix_web::rt::time::interval(period);
    loop {
        interval.tick().await;
        if let Err(err) = store.refresh(&provider, &repo).await {
            log::warn!("rate refresh failed, serving previous snapshot: {err}");
        }
    }
}
