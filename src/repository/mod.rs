use crate::db::{DbConnection, DbPool};
use crate::domain::currency::{Currency, NewCurrencyRate};
use crate::domain::price_list::{NewPriceList, PriceList};
use crate::domain::product_price::{
    NewProductPrice, PriceCandidate, PriceCandidateQuery, ProductPrice,
};
use crate::repository::errors::RepositoryResult;

pub mod errors;

mod currency;
mod price_list;
mod product_price;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over currency records.
pub trait CurrencyReader {
    fn list_currencies(&self) -> RepositoryResult<Vec<Currency>>;
}

/// Write operations over currency records, used by the rate sync.
pub trait CurrencyWriter {
    fn upsert_rates(&self, rates: &[NewCurrencyRate]) -> RepositoryResult<usize>;
}

/// Read-only operations over price list records.
pub trait PriceListReader {
    fn get_price_list_by_id(&self, id: i32) -> RepositoryResult<Option<PriceList>>;
    fn list_price_lists(&self) -> RepositoryResult<Vec<PriceList>>;
}

/// Write operations over price list records (administrative tooling).
pub trait PriceListWriter {
    fn create_price_list(&self, new_list: &NewPriceList) -> RepositoryResult<PriceList>;
}

/// Read-only operations over product price records.
pub trait ProductPriceReader {
    /// All active price records for the queried product whose owning list
    /// is active and either general or scoped to the query's customer
    /// group. Callers with no group only see general lists.
    fn list_price_candidates(
        &self,
        query: PriceCandidateQuery,
    ) -> RepositoryResult<Vec<PriceCandidate>>;
}

/// Write operations over product price records (administrative tooling).
pub trait ProductPriceWriter {
    fn create_product_price(&self, new_price: &NewProductPrice) -> RepositoryResult<ProductPrice>;
}
