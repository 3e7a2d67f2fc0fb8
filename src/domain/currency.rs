use std::collections::HashMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain representation of a known currency and its exchange rate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Currency {
    /// Unique identifier of the currency record.
    pub id: i32,
    /// ISO 4217 currency code.
    pub code: String,
    /// Exchange rate expressed as a ratio to the base currency.
    pub rate: Decimal,
    /// Whether this is the base currency (rate is exactly 1).
    pub is_base: bool,
    /// Timestamp of the last successful rate sync for this currency.
    pub updated_at: NaiveDateTime,
}

/// Payload used to insert or update a currency rate during a sync.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCurrencyRate {
    /// ISO 4217 currency code.
    pub code: String,
    /// Exchange rate expressed as a ratio to the base currency.
    pub rate: Decimal,
    /// Whether this is the base currency.
    pub is_base: bool,
    /// Timestamp captured when the rate was fetched.
    pub updated_at: NaiveDateTime,
}

impl NewCurrencyRate {
    /// Construct an upsert payload with an uppercased, trimmed code.
    pub fn new(code: impl Into<String>, rate: Decimal, is_base: bool) -> Self {
        let code = code.into().trim().to_uppercase();
        Self {
            code,
            rate,
            is_base,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Immutable point-in-time view of all known exchange rates.
///
/// A snapshot is captured once per resolution call and shared by every
/// product priced within that call, so a concurrent refresh can never mix
/// old and new rates inside one response.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    base: String,
    rates: HashMap<String, Decimal>,
    captured_at: NaiveDateTime,
}

impl RateSnapshot {
    /// Build a snapshot from a rate table. The base currency is always
    /// present with a rate of exactly 1, regardless of the input map.
    pub fn new(
        base: impl Into<String>,
        mut rates: HashMap<String, Decimal>,
        captured_at: NaiveDateTime,
    ) -> Self {
        let base = base.into().trim().to_uppercase();
        rates.insert(base.clone(), Decimal::ONE);
        Self {
            base,
            rates,
            captured_at,
        }
    }

    /// A snapshot that only knows the base currency. Used before the first
    /// successful sync on an empty database.
    pub fn base_only(base: impl Into<String>, captured_at: NaiveDateTime) -> Self {
        Self::new(base, HashMap::new(), captured_at)
    }

    /// Code of the base currency.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Rate for `code`, or `None` when the currency is unknown.
    pub fn rate(&self, code: &str) -> Option<Decimal> {
        self.rates.get(code).copied()
    }

    /// Whether `code` is present in the snapshot.
    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    /// When the snapshot was captured.
    pub fn captured_at(&self) -> NaiveDateTime {
        self.captured_at
    }

    /// Number of currencies in the snapshot, the base included.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether the snapshot holds no currencies at all.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Iterate over `(code, rate)` pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datetime() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap_or_default()
    }

    #[test]
    fn snapshot_forces_base_rate_to_one() {
        let mut rates = HashMap::new();
        rates.insert("USD".to_string(), Decimal::new(99, 2));
        rates.insert("EUR".to_string(), Decimal::new(85, 2));

        let snapshot = RateSnapshot::new("usd", rates, datetime());

        assert_eq!(snapshot.base(), "USD");
        assert_eq!(snapshot.rate("USD"), Some(Decimal::ONE));
        assert_eq!(snapshot.rate("EUR"), Some(Decimal::new(85, 2)));
        assert!(!snapshot.contains("GBP"));
    }

    #[test]
    fn base_only_snapshot_contains_a_single_currency() {
        let snapshot = RateSnapshot::base_only("USD", datetime());

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.rate("USD"), Some(Decimal::ONE));
    }
}
