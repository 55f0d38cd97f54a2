//! API endpoint modules.

pub mod health;
pub mod openapi;
pub mod query;

use actix_web::web;

use crate::error::AppError;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use query::configure_routes as configure_query_routes;
pub use tests::configure_routes as configure_test_routes;

/// JSON body errors use the same error body as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::InvalidInput(format!("JSON parsing error: {}", err)).into()
    })
}

/// Query string errors use the same error body as every other failure.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::InvalidInput(format!("Invalid query string: {}", err)).into()
    })
}

/// Configure every route and the extractor error handlers.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .configure(configure_health_routes)
        .configure(configure_test_routes)
        .configure(configure_query_routes);
}
