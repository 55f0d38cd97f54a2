//! In-process record store.
//!
//! Evaluates [`TestQuery`] with the same semantics as the Postgres store:
//! summaries as one case-insensitive regex alternation, docs as JSONB-style
//! containment. Used by the HTTP tests and by `DATABASE_URL=memory`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::Value as JsonValue;
use tokio::sync::RwLock;

use super::store::{Page, SortKey, TestStore};
use crate::error::{AppError, AppResult};
use crate::models::{Doc, Test, TestQuery};

#[derive(Default)]
struct Inner {
    tests: BTreeMap<i64, Test>,
    last_id: i64,
}

/// Test store held entirely in memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tests.
    pub async fn len(&self) -> usize {
        self.inner.read().await.tests.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn matching(&self, query: &TestQuery, sort: SortKey) -> AppResult<Vec<Test>> {
        let filter = Filter::new(query)?;
        let inner = self.inner.read().await;

        let mut matches: Vec<Test> = inner
            .tests
            .values()
            .filter(|test| filter.matches(test))
            .cloned()
            .collect();

        matches.sort_by(|a, b| {
            let (ka, kb) = match sort {
                SortKey::Created => (a.created, b.created),
                SortKey::Modified => (a.modified, b.modified),
            };
            kb.cmp(&ka).then_with(|| b.id.cmp(&a.id))
        });

        Ok(matches)
    }
}

/// A [`TestQuery`] prepared for repeated evaluation.
struct Filter<'a> {
    query: &'a TestQuery,
    summary: Option<Regex>,
}

impl<'a> Filter<'a> {
    fn new(query: &'a TestQuery) -> AppResult<Self> {
        let summary = query.summary_regex()?;
        Ok(Filter { query, summary })
    }

    fn matches(&self, test: &Test) -> bool {
        let q = self.query;

        if !q.ids.is_empty() && !test.id.is_some_and(|id| q.ids.contains(&id)) {
            return false;
        }
        if let Some(ref regex) = self.summary {
            if !regex.is_match(&test.summary) {
                return false;
            }
        }
        if !q.outcomes.is_empty() && !test.outcome.is_some_and(|o| q.outcomes.contains(&o)) {
            return false;
        }
        if !q.analyses.is_empty() && !test.analysis.is_some_and(|a| q.analyses.contains(&a)) {
            return false;
        }
        if !q.resolutions.is_empty()
            && !test.resolution.is_some_and(|r| q.resolutions.contains(&r))
        {
            return false;
        }

        if !within(test.created, q.created_after, q.created_before)
            || !within(test.modified, q.modified_after, q.modified_before)
        {
            return false;
        }

        q.docs.is_empty() || q.docs.iter().any(|partial| doc_contains(&test.doc, partial))
    }
}

/// Exclusive bounds; a bounded check on a missing timestamp fails.
fn within(
    value: Option<DateTime<Utc>>,
    after: Option<DateTime<Utc>>,
    before: Option<DateTime<Utc>>,
) -> bool {
    match value {
        Some(value) => after.is_none_or(|a| value > a) && before.is_none_or(|b| value < b),
        None => after.is_none() && before.is_none(),
    }
}

fn doc_contains(doc: &Doc, partial: &Doc) -> bool {
    partial
        .iter()
        .all(|(key, want)| doc.get(key).is_some_and(|have| json_contains(have, want)))
}

/// JSONB `@>` for nested values: objects by key subset, arrays by element
/// subset, scalars by equality.
fn json_contains(have: &JsonValue, want: &JsonValue) -> bool {
    match (have, want) {
        (JsonValue::Object(have), JsonValue::Object(want)) => doc_contains(have, want),
        (JsonValue::Array(have), JsonValue::Array(want)) => want
            .iter()
            .all(|w| have.iter().any(|h| json_contains(h, w))),
        (JsonValue::Number(a), JsonValue::Number(b)) => a.as_f64() == b.as_f64(),
        (a, b) => a == b,
    }
}

fn paginate(tests: Vec<Test>, page: Page) -> Vec<Test> {
    let skipped = tests
        .into_iter()
        .skip(usize::try_from(page.offset).unwrap_or(usize::MAX));
    match page.limit {
        Some(limit) => skipped
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect(),
        None => skipped.collect(),
    }
}

#[async_trait]
impl TestStore for MemoryStore {
    async fn insert_test(&self, test: &Test) -> AppResult<i64> {
        test.validate()?;

        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = inner.last_id;
        let now = Utc::now();

        let mut stored = test.clone();
        stored.id = Some(id);
        stored.created = Some(now);
        stored.modified = Some(now);
        inner.tests.insert(id, stored);

        Ok(id)
    }

    async fn get_test(&self, id: i64) -> AppResult<Option<Test>> {
        Ok(self.inner.read().await.tests.get(&id).cloned())
    }

    async fn update_test(&self, test: &Test) -> AppResult<Test> {
        let id = test
            .id
            .ok_or_else(|| AppError::InvalidInput("cannot update a test without an id".to_string()))?;
        test.validate()?;

        let mut inner = self.inner.write().await;
        let stored = inner
            .tests
            .get_mut(&id)
            .ok_or(AppError::RecordNotFound(id))?;

        stored.summary = test.summary.clone();
        stored.outcome = test.outcome;
        stored.analysis = test.analysis;
        stored.resolution = test.resolution;
        stored.doc = test.doc.clone();
        stored.modified = Some(Utc::now());

        Ok(stored.clone())
    }

    async fn query_tests(
        &self,
        query: &TestQuery,
        sort: SortKey,
        page: Page,
    ) -> AppResult<Vec<Test>> {
        let matches = self.matching(query, sort).await?;
        Ok(paginate(matches, page))
    }

    async fn query_test_ids(&self, query: &TestQuery, sort: SortKey) -> AppResult<Vec<i64>> {
        let matches = self.matching(query, sort).await?;
        Ok(matches.into_iter().filter_map(|test| test.id).collect())
    }

    async fn delete_tests(&self, ids: &[i64]) -> AppResult<u64> {
        let mut inner = self.inner.write().await;
        let mut deleted = 0;
        for id in ids {
            if inner.tests.remove(id).is_some() {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
