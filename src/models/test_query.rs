//! Test query DTOs: filters, query responses and bulk operation results.

use chrono::{DateTime, Utc};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::oar::{Analysis, Outcome, Resolution};
use super::test::{Doc, Test};
use crate::error::{AppError, AppResult};

/// Default page size for `GET /tests`.
pub const DEFAULT_LIMIT: u64 = 250;

/// Largest page size a caller may request.
pub const MAX_LIMIT: u64 = 1000;

/// Filter over stored tests.
///
/// Every field is optional. Values inside one array are OR-ed together;
/// distinct fields are AND-ed. Timestamp bounds are exclusive. A test matches
/// `docs` when its doc contains any one of the partial documents.
/// Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TestQuery {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub summaries: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outcomes: Vec<Outcome>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub analyses: Vec<Analysis>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resolutions: Vec<Resolution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_before: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_after: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_before: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_after: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(value_type = Vec<Object>)]
    pub docs: Vec<Doc>,
}

impl TestQuery {
    /// Query matching exactly the given ids.
    pub fn by_ids(ids: Vec<i64>) -> Self {
        TestQuery {
            ids,
            ..Default::default()
        }
    }

    /// True when no field constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        *self == TestQuery::default()
    }

    /// The `summaries` joined into one case-insensitive alternation.
    ///
    /// `None` when there are no summaries. A pattern that does not compile
    /// is the caller's fault and reported as `InvalidInput`.
    pub fn summary_regex(&self) -> AppResult<Option<Regex>> {
        if self.summaries.is_empty() {
            return Ok(None);
        }

        let pattern = self.summaries.join("|");
        RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map(Some)
            .map_err(|e| {
                AppError::InvalidInput(format!("invalid summary pattern '{}': {}", pattern, e))
            })
    }
}

/// Response for `GET /tests`, most recent first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestQueryResponse {
    /// Number of tests in this page
    pub count: u64,
    pub tests: Vec<Test>,
}

impl TestQueryResponse {
    pub fn new(tests: Vec<Test>) -> Self {
        TestQueryResponse {
            count: tests.len() as u64,
            tests,
        }
    }
}

/// Reference to a test by id, as sent in the body of an id-list delete.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct TestRef {
    #[serde(alias = "ID", alias = "Id")]
    pub id: i64,
}

/// Query-string parameters for `GET /tests`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTestsParams {
    /// Opaque filter token from `POST /query`. Absent means unconstrained.
    pub query: Option<String>,
    /// Results per page (default 250, max 1000).
    pub limit: Option<u64>,
    /// Number of matches to skip.
    pub offset: Option<u64>,
}

/// Query-string parameters for bulk patch and delete.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BulkParams {
    /// Opaque filter token from `POST /query`.
    pub query: Option<String>,
}

/// Result of `PATCH /tests`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkPatchResponse {
    pub updated: u64,
}

/// Result of `DELETE /tests`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkDeleteResponse {
    pub deleted: u64,
}
