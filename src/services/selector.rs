//! Picks the winning price record among the candidates for one product.

use crate::domain::product_price::PriceCandidate;

/// Select the governing price record from a candidate set.
///
/// Precedence, most significant first:
/// 1. lists scoped to the caller's customer group beat general lists,
///    regardless of priority;
/// 2. higher list priority;
/// 3. most recently updated record;
/// 4. highest record id, as a stable final tie-break.
///
/// Returns `None` when the candidate set is empty.
pub fn select_candidate(candidates: Vec<PriceCandidate>) -> Option<PriceCandidate> {
    candidates.into_iter().max_by_key(|candidate| {
        (
            candidate.is_group_specific(),
            candidate.priority,
            candidate.price.updated_at,
            candidate.price.id,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    use crate::domain::product_price::ProductPrice;

    fn datetime(secs: u32) -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
            .and_then(|date| date.and_hms_opt(12, 0, secs))
            .unwrap_or_default()
    }

    fn candidate(
        id: i32,
        group: Option<&str>,
        priority: i32,
        updated_secs: u32,
    ) -> PriceCandidate {
        PriceCandidate {
            price: ProductPrice {
                id,
                product_id: 1,
                price_list_id: id,
                base_price_cents: 10_000,
                sale_price_cents: None,
                sale_starts_at: None,
                sale_ends_at: None,
                is_active: true,
                tiers: Vec::new(),
                created_at: datetime(0),
                updated_at: datetime(updated_secs),
            },
            currency: "USD".to_string(),
            customer_group_id: group.map(str::to_string),
            priority,
        }
    }

    #[test]
    fn empty_candidate_set_selects_nothing() {
        assert!(select_candidate(Vec::new()).is_none());
    }

    #[test]
    fn group_specific_beats_general_at_equal_priority() {
        let picked = select_candidate(vec![
            candidate(1, None, 0, 0),
            candidate(2, Some("wholesale"), 0, 0),
        ])
        .unwrap();

        assert_eq!(picked.price.id, 2);
    }

    #[test]
    fn group_specific_beats_general_even_with_lower_priority() {
        let picked = select_candidate(vec![
            candidate(1, None, 100, 0),
            candidate(2, Some("wholesale"), 0, 0),
        ])
        .unwrap();

        assert_eq!(picked.price.id, 2);
    }

    #[test]
    fn priority_breaks_ties_within_a_specificity_tier() {
        let picked = select_candidate(vec![
            candidate(1, None, 5, 0),
            candidate(2, None, 10, 0),
            candidate(3, None, 1, 0),
        ])
        .unwrap();

        assert_eq!(picked.price.id, 2);
    }

    #[test]
    fn recency_breaks_remaining_ties() {
        let picked = select_candidate(vec![
            candidate(1, None, 0, 30),
            candidate(2, None, 0, 10),
        ])
        .unwrap();

        assert_eq!(picked.price.id, 1);
    }
}
