//! Record store contract consumed by the test services.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Test, TestQuery};

/// Column a result set is sorted on, most recent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Created,
    Modified,
}

impl SortKey {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Modified => "modified",
        }
    }
}

/// Window over a sorted result set. `limit: None` returns every match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Page {
    pub limit: Option<u64>,
    pub offset: u64,
}

impl Page {
    pub fn new(limit: u64, offset: u64) -> Self {
        Page {
            limit: Some(limit),
            offset,
        }
    }

    /// Every match, no offset.
    pub fn all() -> Self {
        Page::default()
    }
}

/// Persistence boundary for tests.
///
/// Implementations own `id`, `created` and `modified`. Ties on the sort key
/// are broken by descending id.
#[async_trait]
pub trait TestStore: Send + Sync {
    /// Insert a validated test and return its new id.
    async fn insert_test(&self, test: &Test) -> AppResult<i64>;

    async fn get_test(&self, id: i64) -> AppResult<Option<Test>>;

    /// Overwrite the stored test with the same id and bump `modified`.
    ///
    /// Fails with `RecordNotFound` when no row has that id.
    async fn update_test(&self, test: &Test) -> AppResult<Test>;

    async fn query_tests(&self, query: &TestQuery, sort: SortKey, page: Page)
    -> AppResult<Vec<Test>>;

    /// Materialize the ids of every match, in sort order.
    async fn query_test_ids(&self, query: &TestQuery, sort: SortKey) -> AppResult<Vec<i64>>;

    /// Delete the given ids, returning how many rows existed. Unknown ids are ignored.
    async fn delete_tests(&self, ids: &[i64]) -> AppResult<u64>;

    /// Readiness probe.
    async fn ping(&self) -> AppResult<()>;
}
