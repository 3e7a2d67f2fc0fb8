use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod calculator;
pub mod converter;
pub mod rates;
pub mod resolver;
pub mod selector;

/// Result alias returned by service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the pricing services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No applicable price record exists for the product.
    #[error("not found")]
    NotFound,
    /// The request was rejected before touching the database.
    #[error("validation error: {0}")]
    Validation(String),
    /// A currency code involved in conversion is absent from the rate
    /// snapshot. Unlike [`ServiceError::Validation`] this can fire deep in
    /// the pipeline when a price list references a vanished currency.
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),
    /// Persistence-layer failure.
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}
