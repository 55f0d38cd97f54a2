//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "OAR Service",
        version = "0.1.0",
        description = "Records test executions and tracks their outcome, analysis and resolution"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Test endpoints
        api::tests::create_test,
        api::tests::patch_test,
        api::tests::patch_tests,
        api::tests::list_tests,
        api::tests::delete_tests,
        api::query::create_query_token,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Tests
            models::Outcome,
            models::Analysis,
            models::Resolution,
            models::Test,
            models::TestQuery,
            models::TestQueryResponse,
            models::TestRef,
            models::BulkPatchResponse,
            models::BulkDeleteResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Tests", description = "Create, query, patch and delete test records")
    )
)]
pub struct ApiDoc;
