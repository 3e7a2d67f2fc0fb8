//! Resolution façade: the only entry point callers use to price products.
//!
//! Every call validates its inputs, captures exactly one rate snapshot,
//! and threads that snapshot through each per-product resolution so a
//! background refresh landing mid-call cannot mix rates inside one
//! response.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::currency::RateSnapshot;
use crate::domain::product_price::PriceCandidateQuery;
use crate::domain::resolution::{BatchEntry, PriceResult};
use crate::repository::ProductPriceReader;
use crate::services::rates::RateStore;
use crate::services::{ServiceError, ServiceResult, calculator, converter, selector};

/// Query parameters accepted by the price resolution endpoints.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct ResolveQuery {
    /// Requested quantity; defaults to 1.
    #[validate(range(min = 1, message = "quantity must be positive"))]
    pub quantity: Option<i32>,
    /// Target currency code; defaults to the base currency.
    pub currency: Option<String>,
    /// Customer group of the caller, if known.
    pub customer_group: Option<String>,
}

/// Validated inputs plus the one snapshot shared by the whole call.
struct ResolveContext {
    snapshot: Arc<RateSnapshot>,
    quantity: i32,
    currency: String,
    customer_group: Option<String>,
}

impl ResolveContext {
    /// Validate the query and capture the snapshot. Runs before any
    /// repository access; a bad quantity or unknown currency never
    /// reaches the database.
    fn prepare(store: &RateStore, query: &ResolveQuery) -> ServiceResult<Self> {
        query
            .validate()
            .map_err(|err| ServiceError::Validation(err.to_string()))?;

        let snapshot = store.current_snapshot();
        let currency = match query.currency.as_deref() {
            Some(code) => code.trim().to_uppercase(),
            None => snapshot.base().to_string(),
        };

        if !snapshot.contains(&currency) {
            return Err(ServiceError::Validation(format!(
                "currency {currency} is not in the current rate snapshot"
            )));
        }

        Ok(Self {
            snapshot,
            quantity: query.quantity.unwrap_or(1),
            currency,
            customer_group: query.customer_group.clone(),
        })
    }
}

/// Resolve the price of a single product.
pub fn resolve_one<R>(
    repo: &R,
    store: &RateStore,
    product_id: i32,
    query: &ResolveQuery,
    now: NaiveDateTime,
) -> ServiceResult<PriceResult>
where
    R: ProductPriceReader + ?Sized,
{
    let context = ResolveContext::prepare(store, query)?;
    resolve_with_snapshot(repo, &context, product_id, now)
}

/// Resolve prices for a batch of products against one shared snapshot.
///
/// The batch succeeds partially: products without an applicable price (or
/// whose price list references a currency missing from the snapshot) come
/// back as [`BatchEntry::Unavailable`]; only genuine repository errors
/// abort the whole call.
pub fn resolve_many<R>(
    repo: &R,
    store: &RateStore,
    product_ids: &[i32],
    query: &ResolveQuery,
    now: NaiveDateTime,
) -> ServiceResult<BTreeMap<i32, BatchEntry>>
where
    R: ProductPriceReader + ?Sized,
{
    let context = ResolveContext::prepare(store, query)?;

    let mut entries = BTreeMap::new();
    for &product_id in product_ids {
        let entry = match resolve_with_snapshot(repo, &context, product_id, now) {
            Ok(result) => BatchEntry::Priced(result),
            Err(ServiceError::NotFound) => BatchEntry::Unavailable,
            Err(ServiceError::UnsupportedCurrency(code)) => {
                log::warn!(
                    "product {product_id} is priced in {code}, which is missing from the snapshot"
                );
                BatchEntry::Unavailable
            }
            Err(other) => return Err(other),
        };
        entries.insert(product_id, entry);
    }

    Ok(entries)
}

/// Parse the comma-separated `ids` parameter of the batch endpoint.
pub fn parse_id_list(raw: &str) -> ServiceResult<Vec<i32>> {
    let mut ids = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let id = part.parse::<i32>().map_err(|_| {
            ServiceError::Validation(format!("invalid product id {part:?} in ids parameter"))
        })?;
        ids.push(id);
    }

    if ids.is_empty() {
        return Err(ServiceError::Validation(
            "ids parameter contains no product ids".to_string(),
        ));
    }

    Ok(ids)
}

/// Per-product pipeline: select the governing record, apply the pricing
/// rules, convert into the requested currency, round once.
fn resolve_with_snapshot<R>(
    repo: &R,
    context: &ResolveContext,
    product_id: i32,
    now: NaiveDateTime,
) -> ServiceResult<PriceResult>
where
    R: ProductPriceReader + ?Sized,
{
    let mut candidate_query = PriceCandidateQuery::new(product_id);
    if let Some(group) = &context.customer_group {
        candidate_query = candidate_query.for_customer_group(group);
    }

    let candidates = repo.list_price_candidates(candidate_query)?;
    let candidate = selector::select_candidate(candidates).ok_or(ServiceError::NotFound)?;

    let effective = calculator::effective_price(&candidate.price, context.quantity, now)?;

    let price = converter::convert(
        effective.price,
        &candidate.currency,
        &context.currency,
        &context.snapshot,
    )?;
    let original_price = converter::convert(
        effective.original_price,
        &candidate.currency,
        &context.currency,
        &context.snapshot,
    )?;

    Ok(PriceResult {
        product_id,
        price: converter::round_minor_units(price),
        original_price: converter::round_minor_units(original_price),
        currency: context.currency.clone(),
        on_sale: effective.on_sale,
        applied_tier: effective.applied_tier,
        price_list_id: candidate.price.price_list_id,
    })
}
