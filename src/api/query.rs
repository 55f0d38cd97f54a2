//! Query token endpoint.

use actix_web::{HttpResponse, web};

use crate::error::{AppResult, ErrorResponse};
use crate::models::TestQuery;
use crate::services::encode_query;

/// Encode a filter into the opaque token accepted by `/tests`.
#[utoipa::path(
    post,
    path = "/query",
    tag = "Tests",
    request_body = TestQuery,
    responses(
        (status = 200, description = "Opaque query token", body = String),
        (status = 400, description = "Malformed query", body = ErrorResponse),
    )
)]
pub async fn create_query_token(query: web::Json<TestQuery>) -> AppResult<HttpResponse> {
    let token = encode_query(&query)?;
    Ok(HttpResponse::Ok().json(token))
}

/// Configure query routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/query").route(web::post().to(create_query_token)));
}
