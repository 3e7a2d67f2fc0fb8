pub mod db;
pub mod domain;
pub mod external;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Base currency assumed when `BASE_CURRENCY` is not configured.
pub const DEFAULT_BASE_CURRENCY: &str = "USD";
/// Default period between rate refresh attempts, in seconds.
pub const DEFAULT_RATE_REFRESH_SECS: u64 = 3600;
/// Default network timeout for one provider fetch, in seconds.
pub const DEFAULT_RATE_FETCH_TIMEOUT_SECS: u64 = 10;
