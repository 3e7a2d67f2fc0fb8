//! Currency conversion against one immutable rate snapshot.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::currency::RateSnapshot;
use crate::services::{ServiceError, ServiceResult};

/// Minor-unit precision shared by the currencies in scope.
pub const MINOR_UNIT_DECIMALS: u32 = 2;

/// Convert `amount` from `source` to `target` using a single snapshot.
///
/// Identical codes short-circuit to the exact input amount without
/// consulting the snapshot. The result is left unrounded; rounding happens
/// once at the end of the resolution pipeline, never per step.
pub fn convert(
    amount: Decimal,
    source: &str,
    target: &str,
    snapshot: &RateSnapshot,
) -> ServiceResult<Decimal> {
    if source == target {
        return Ok(amount);
    }

    let source_rate = snapshot
        .rate(source)
        .ok_or_else(|| ServiceError::UnsupportedCurrency(source.to_string()))?;
    let target_rate = snapshot
        .rate(target)
        .ok_or_else(|| ServiceError::UnsupportedCurrency(target.to_string()))?;

    // Refresh rejects non-positive rates, but a hand-edited currency row
    // could still carry one; an unusable rate means an unusable currency.
    if source_rate <= Decimal::ZERO || target_rate <= Decimal::ZERO {
        let bad = if source_rate <= Decimal::ZERO { source } else { target };
        return Err(ServiceError::UnsupportedCurrency(bad.to_string()));
    }

    Ok(amount * target_rate / source_rate)
}

/// Round an amount to the target currency's minor unit, half-to-even.
pub fn round_minor_units(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MINOR_UNIT_DECIMALS, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn snapshot() -> RateSnapshot {
        let mut rates = HashMap::new();
        rates.insert("EUR".to_string(), Decimal::new(85, 2)); // 0.85
        rates.insert("GBP".to_string(), Decimal::new(75, 2)); // 0.75
        rates.insert("JPY".to_string(), Decimal::new(15531, 2)); // 155.31
        RateSnapshot::new("USD", rates, chrono::Utc::now().naive_utc())
    }

    #[test]
    fn identity_conversion_is_exact_without_snapshot_lookup() {
        let amount = Decimal::new(123_456_789, 4);
        let empty = RateSnapshot::base_only("USD", chrono::Utc::now().naive_utc());

        // XXX is absent from the snapshot; identity must not look it up.
        assert_eq!(convert(amount, "XXX", "XXX", &empty).unwrap(), amount);
    }

    #[test]
    fn converts_through_the_base_rate_ratio() {
        let result = convert(Decimal::new(10_000, 2), "USD", "EUR", &snapshot()).unwrap();

        assert_eq!(result, Decimal::new(8_500, 2));
    }

    #[test]
    fn converts_between_two_non_base_currencies() {
        // 85 EUR -> USD -> GBP: 85 * 0.75 / 0.85 = 75
        let result = convert(Decimal::new(8_500, 2), "EUR", "GBP", &snapshot()).unwrap();

        assert_eq!(round_minor_units(result), Decimal::new(7_500, 2));
    }

    #[test]
    fn round_trip_is_idempotent_within_rounding_tolerance() {
        let amount = Decimal::new(12_347, 2);
        let snapshot = snapshot();

        let there = convert(amount, "USD", "JPY", &snapshot).unwrap();
        let back = convert(there, "JPY", "USD", &snapshot).unwrap();

        let tolerance = Decimal::new(1, 2);
        assert!((round_minor_units(back) - amount).abs() <= tolerance);
    }

    #[test]
    fn unknown_currency_is_unsupported() {
        let result = convert(Decimal::ONE, "USD", "XXX", &snapshot());
        assert!(matches!(
            result,
            Err(ServiceError::UnsupportedCurrency(code)) if code == "XXX"
        ));

        let result = convert(Decimal::ONE, "XXX", "USD", &snapshot());
        assert!(matches!(
            result,
            Err(ServiceError::UnsupportedCurrency(code)) if code == "XXX"
        ));
    }

    #[test]
    fn rounding_is_half_to_even() {
        assert_eq!(round_minor_units(Decimal::new(10_125, 3)), Decimal::new(1_012, 2));
        assert_eq!(round_minor_units(Decimal::new(10_135, 3)), Decimal::new(1_014, 2));
        assert_eq!(round_minor_units(Decimal::new(10_131, 3)), Decimal::new(1_013, 2));
    }
}
