use std::env;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use storefront_pricing::db::establish_connection_pool;
use storefront_pricing::external::HttpRateProvider;
use storefront_pricing::repository::DieselRepository;
use storefront_pricing::routes::api::{health, resolve_product_price, resolve_product_prices};
use storefront_pricing::services::rates::{RateStore, run_refresh_loop};
use storefront_pricing::{
    DEFAULT_BASE_CURRENCY, DEFAULT_RATE_FETCH_TIMEOUT_SECS, DEFAULT_RATE_REFRESH_SECS,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let base_currency =
        env::var("BASE_CURRENCY").unwrap_or(DEFAULT_BASE_CURRENCY.to_string());
    let refresh_secs = env::var("RATE_REFRESH_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(DEFAULT_RATE_REFRESH_SECS);
    let fetch_timeout_secs = env::var("RATE_FETCH_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(DEFAULT_RATE_FETCH_TIMEOUT_SECS);

    let provider_url = match env::var("RATE_PROVIDER_URL") {
        Ok(provider_url) => provider_url,
        Err(_) => {
            log::error!("RATE_PROVIDER_URL environment variable not set");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let store = match RateStore::seed(&repo, &base_currency) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            log::error!("Failed to seed the rate store: {e}");
            std::process::exit(1);
        }
    };

    let provider =
        match HttpRateProvider::new(&provider_url, Duration::from_secs(fetch_timeout_secs)) {
            Ok(provider) => provider,
            Err(e) => {
                log::error!("Failed to build the rate provider client: {e}");
                std::process::exit(1);
            }
        };

    actix_web::rt::spawn(run_refresh_loop(
        store.clone(),
        provider,
        repo.clone(),
        Duration::from_secs(refresh_secs),
    ));

    let store = web::Data::from(store);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(resolve_product_price)
            .service(resolve_product_prices)
            .service(health)
            .app_data(web::Data::new(repo.clone()))
            .app_data(store.clone())
    })
    .bind((address, port))?
    .run()
    .await
}
