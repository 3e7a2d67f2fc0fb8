use actix_web::{HttpResponse, Responder, get, web};
use chrono::Utc;
use serde::Deserialize;

use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::rates::RateStore;
use crate::services::resolver::{self, ResolveQuery};

/// Query parameters accepted by the batch pricing endpoint.
#[derive(Debug, Deserialize)]
pub struct BatchPriceQuery {
    /// Comma-separated product identifiers.
    pub ids: String,
    /// Requested quantity, shared by every product in the batch.
    pub quantity: Option<i32>,
    /// Target currency code; defaults to the base currency.
    pub currency: Option<String>,
    /// Customer group of the caller, if known.
    pub customer_group: Option<String>,
}

#[get("/api/v1/products/{product_id}/price")]
/// Resolve the price of a single product in the requested currency.
pub async fn resolve_product_price(
    path: web::Path<i32>,
    params: web::Query<ResolveQuery>,
    repo: web::Data<DieselRepository>,
    store: web::Data<RateStore>,
) -> impl Responder {
    let now = Utc::now().naive_utc();
    match resolver::resolve_one(
        repo.get_ref(),
        store.get_ref(),
        path.into_inner(),
        &params.0,
        now,
    ) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(err) => error_response(err),
    }
}

#[get("/api/v1/prices")]
/// Resolve prices for a batch of products against one rate snapshot.
pub async fn resolve_product_prices(
    params: web::Query<BatchPriceQuery>,
    repo: web::Data<DieselRepository>,
    store: web::Data<RateStore>,
) -> impl Responder {
    let params = params.into_inner();
    let ids = match resolver::parse_id_list(&params.ids) {
        Ok(ids) => ids,
        Err(err) => return error_response(err),
    };

    let query = ResolveQuery {
        quantity: params.quantity,
        currency: params.currency,
        customer_group: params.customer_group,
    };

    let now = Utc::now().naive_utc();
    match resolver::resolve_many(repo.get_ref(), store.get_ref(), &ids, &query, now) {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(err) => error_response(err),
    }
}

#[get("/health")]
/// Report the health of the rate store for the surrounding platform.
pub async fn health(store: web::Data<RateStore>) -> impl Responder {
    HttpResponse::Ok().json(store.health())
}

fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Validation(msg) => HttpResponse::BadRequest().body(msg),
        ServiceError::UnsupportedCurrency(code) => {
            HttpResponse::BadRequest().body(format!("unsupported currency: {code}"))
        }
        ServiceError::Repository(err) => {
            log::error!("Failed to resolve prices: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
