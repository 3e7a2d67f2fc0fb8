//! Computes the effective price of one winning record in its native
//! currency.
//!
//! Precedence is an ordered list of named rules evaluated top to bottom;
//! the first rule that matches wins and base pricing is the documented
//! fallback when none does.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::domain::product_price::ProductPrice;
use crate::services::{ServiceError, ServiceResult};

/// Price computed for one record, unrounded, in the record's native
/// currency.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectivePrice {
    /// Amount the rule produced.
    pub price: Decimal,
    /// The regular price, always carried for strikethrough display.
    pub original_price: Decimal,
    /// Whether the sale-window rule fired.
    pub on_sale: bool,
    /// Threshold of the quantity tier that fired, if any.
    pub applied_tier: Option<i32>,
}

/// One named step in the precedence list. Returning `None` means "pass,
/// try the next rule".
trait PricingRule {
    fn name(&self) -> &'static str;
    fn evaluate(
        &self,
        record: &ProductPrice,
        quantity: i32,
        now: NaiveDateTime,
    ) -> Option<EffectivePrice>;
}

/// Tiered quantity pricing: the largest threshold not exceeding the
/// requested quantity wins. Only consulted for quantities above one.
struct TieredQuantityRule;

impl PricingRule for TieredQuantityRule {
    fn name(&self) -> &'static str {
        "tiered-quantity"
    }

    fn evaluate(
        &self,
        record: &ProductPrice,
        quantity: i32,
        _now: NaiveDateTime,
    ) -> Option<EffectivePrice> {
        if quantity <= 1 {
            return None;
        }
        let tier = record.tier_for(quantity)?;
        Some(EffectivePrice {
            price: tier.price(),
            original_price: record.base_price(),
            on_sale: false,
            applied_tier: Some(tier.min_quantity),
        })
    }
}

/// Sale pricing: honored when a sale price is set and `now` falls inside
/// the (possibly open-ended) sale window.
struct SaleWindowRule;

impl PricingRule for SaleWindowRule {
    fn name(&self) -> &'static str {
        "sale-window"
    }

    fn evaluate(
        &self,
        record: &ProductPrice,
        _quantity: i32,
        now: NaiveDateTime,
    ) -> Option<EffectivePrice> {
        if !record.sale_active(now) {
            return None;
        }
        let sale_price = record.sale_price()?;
        Some(EffectivePrice {
            price: sale_price,
            original_price: record.base_price(),
            on_sale: true,
            applied_tier: None,
        })
    }
}

/// The precedence list. Base pricing is the fallback when every rule
/// passes.
fn rules() -> [&'static dyn PricingRule; 2] {
    [&TieredQuantityRule, &SaleWindowRule]
}

/// Apply the pricing rules to one record.
///
/// A non-positive quantity is a validation error, never coerced to one.
/// Tier prices above the base price are honored as stored; the read path
/// does not second-guess administrative data.
pub fn effective_price(
    record: &ProductPrice,
    quantity: i32,
    now: NaiveDateTime,
) -> ServiceResult<EffectivePrice> {
    if quantity < 1 {
        return Err(ServiceError::Validation(format!(
            "quantity must be positive, got {quantity}"
        )));
    }

    for rule in rules() {
        if let Some(price) = rule.evaluate(record, quantity, now) {
            log::debug!(
                "pricing rule {} matched for product price {}",
                rule.name(),
                record.id
            );
            return Ok(price);
        }
    }

    Ok(EffectivePrice {
        price: record.base_price(),
        original_price: record.base_price(),
        on_sale: false,
        applied_tier: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::product_price::PriceTier;

    fn datetime(day: u32) -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 6, day)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap_or_default()
    }

    fn tier(id: i32, min_quantity: i32, price_cents: i64) -> PriceTier {
        PriceTier {
            id,
            product_price_id: 1,
            min_quantity,
            price_cents,
            created_at: datetime(1),
            updated_at: datetime(1),
        }
    }

    fn record(base_price_cents: i64, tiers: Vec<PriceTier>) -> ProductPrice {
        ProductPrice {
            id: 1,
            product_id: 7,
            price_list_id: 3,
            base_price_cents,
            sale_price_cents: None,
            sale_starts_at: None,
            sale_ends_at: None,
            is_active: true,
            tiers,
            created_at: datetime(1),
            updated_at: datetime(1),
        }
    }

    fn tiered_record() -> ProductPrice {
        record(10_000, vec![tier(1, 5, 9_000), tier(2, 10, 8_000)])
    }

    #[test]
    fn quantity_below_lowest_tier_falls_through_to_base() {
        let result = effective_price(&tiered_record(), 1, datetime(15)).unwrap();

        assert_eq!(result.price, Decimal::new(10_000, 2));
        assert_eq!(result.applied_tier, None);
        assert!(!result.on_sale);
    }

    #[test]
    fn tier_selection_uses_largest_threshold_not_exceeding_quantity() {
        let cases = [(5, 9_000, 5), (9, 9_000, 5), (10, 8_000, 10), (100, 8_000, 10)];

        for (quantity, expected_cents, expected_tier) in cases {
            let result = effective_price(&tiered_record(), quantity, datetime(15)).unwrap();
            assert_eq!(result.price, Decimal::new(expected_cents, 2), "q={quantity}");
            assert_eq!(result.applied_tier, Some(expected_tier), "q={quantity}");
            assert_eq!(result.original_price, Decimal::new(10_000, 2));
        }
    }

    #[test]
    fn resolved_price_is_non_increasing_across_quantities() {
        let record = tiered_record();
        let mut previous = Decimal::MAX;

        for quantity in 1..=20 {
            let result = effective_price(&record, quantity, datetime(15)).unwrap();
            assert!(
                result.price <= previous,
                "price went up between q={} and q={quantity}",
                quantity - 1
            );
            previous = result.price;
        }
    }

    #[test]
    fn sale_price_applies_inside_window() {
        let mut record = record(20_000, Vec::new());
        record.sale_price_cents = Some(15_000);
        record.sale_starts_at = Some(datetime(10));
        record.sale_ends_at = Some(datetime(20));

        let result = effective_price(&record, 1, datetime(15)).unwrap();

        assert_eq!(result.price, Decimal::new(15_000, 2));
        assert!(result.on_sale);
        assert_eq!(result.original_price, Decimal::new(20_000, 2));
    }

    #[test]
    fn sale_price_ignored_outside_window() {
        let mut record = record(20_000, Vec::new());
        record.sale_price_cents = Some(15_000);
        record.sale_starts_at = Some(datetime(10));
        record.sale_ends_at = Some(datetime(20));

        let result = effective_price(&record, 1, datetime(25)).unwrap();

        assert_eq!(result.price, Decimal::new(20_000, 2));
        assert!(!result.on_sale);
    }

    #[test]
    fn open_ended_sale_window_is_unbounded_on_the_missing_side() {
        let mut record = record(20_000, Vec::new());
        record.sale_price_cents = Some(15_000);
        record.sale_ends_at = Some(datetime(20));

        let result = effective_price(&record, 1, datetime(2)).unwrap();
        assert!(result.on_sale);

        record.sale_ends_at = None;
        record.sale_starts_at = Some(datetime(10));
        let result = effective_price(&record, 1, datetime(28)).unwrap();
        assert!(result.on_sale);
    }

    #[test]
    fn matching_tier_beats_an_active_sale() {
        let mut record = tiered_record();
        record.sale_price_cents = Some(9_500);

        let result = effective_price(&record, 5, datetime(15)).unwrap();

        assert_eq!(result.price, Decimal::new(9_000, 2));
        assert_eq!(result.applied_tier, Some(5));
        assert!(!result.on_sale);
    }

    #[test]
    fn quantity_one_never_consults_tiers() {
        let record = record(10_000, vec![tier(1, 1, 500)]);

        let result = effective_price(&record, 1, datetime(15)).unwrap();

        assert_eq!(result.price, Decimal::new(10_000, 2));
        assert_eq!(result.applied_tier, None);
    }

    #[test]
    fn tier_priced_above_base_is_honored_as_stored() {
        let record = record(10_000, vec![tier(1, 5, 12_000)]);

        let result = effective_price(&record, 6, datetime(15)).unwrap();

        assert_eq!(result.price, Decimal::new(12_000, 2));
        assert_eq!(result.applied_tier, Some(5));
    }

    #[test]
    fn non_positive_quantity_is_a_validation_error() {
        for quantity in [0, -1, -100] {
            let result = effective_price(&tiered_record(), quantity, datetime(15));
            assert!(matches!(result, Err(ServiceError::Validation(_))), "q={quantity}");
        }
    }
}
