//! Error type shared by all repository operations.

use thiserror::Error;

/// Result alias returned by repository traits.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors surfaced by the persistence layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,
    /// Underlying Diesel query failure.
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    /// The connection pool could not hand out a connection.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// A stored value could not be converted into its domain shape.
    #[error("stored value conversion failed: {0}")]
    Conversion(String),
}
