//! Compiles a [`TestQuery`] into a parameterized Postgres predicate.
//!
//! Every user-supplied value is bound as a statement parameter; the SQL text
//! only ever contains column names, operators and `$n` placeholders.
//!
//! | Field | Clause |
//! |---|---|
//! | `ids`, `outcomes`, `analyses`, `resolutions` | `col = ANY($n)`, bound to one array |
//! | `summaries` | `summary ~* $n`, bound to the `|`-joined alternatives |
//! | `docs` | `(doc @> $a::jsonb OR doc @> $b::jsonb ...)` |
//! | `createdBefore` ... `modifiedAfter` | `created < $n`, `created > $n`, ... |
//!
//! Clauses are AND-ed; an empty query compiles to no predicate at all.

use sea_orm::Value;

use super::store::{Page, SortKey};
use crate::models::{Analysis, Outcome, Resolution, TestQuery};

/// Output of [`compile`], ready to be stitched onto a `SELECT` or `DELETE`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    /// AND-ed clauses without the `WHERE` keyword.
    pub predicate: Option<String>,
    /// Values for `$1..$n`, in order.
    pub params: Vec<Value>,
    pub order: String,
    /// `LIMIT`/`OFFSET` clause, empty when unpaginated.
    pub pagination: String,
}

impl CompiledQuery {
    /// Full statement selecting `columns` from `table`.
    pub fn select_sql(&self, columns: &str, table: &str) -> String {
        let mut sql = format!("SELECT {} FROM {}", columns, table);
        if let Some(ref predicate) = self.predicate {
            sql.push_str(" WHERE ");
            sql.push_str(predicate);
        }
        sql.push(' ');
        sql.push_str(&self.order);
        if !self.pagination.is_empty() {
            sql.push(' ');
            sql.push_str(&self.pagination);
        }
        sql
    }
}

/// Accumulates clauses and assigns placeholder numbers as values are bound.
#[derive(Default)]
struct PredicateBuilder {
    clauses: Vec<String>,
    params: Vec<Value>,
}

impl PredicateBuilder {
    fn bind(&mut self, value: Value) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    /// One array parameter per set, whatever its length.
    fn membership<T>(&mut self, column: &str, values: Vec<T>)
    where
        Vec<T>: Into<Value>,
    {
        if values.is_empty() {
            return;
        }
        let placeholder = self.bind(values.into());
        self.clauses
            .push(format!("{} = ANY({})", column, placeholder));
    }

    fn compare<T: Into<Value>>(&mut self, column: &str, op: &str, value: Option<T>) {
        if let Some(value) = value {
            let placeholder = self.bind(value.into());
            self.clauses.push(format!("{} {} {}", column, op, placeholder));
        }
    }

    fn finish(self) -> (Option<String>, Vec<Value>) {
        let predicate = if self.clauses.is_empty() {
            None
        } else {
            Some(self.clauses.join(" AND "))
        };
        (predicate, self.params)
    }
}

/// Compile `query` into a predicate, ordering and pagination clause.
///
/// `page` is used as given; limits are checked by the caller.
pub fn compile(query: &TestQuery, sort: SortKey, page: Page) -> CompiledQuery {
    let mut builder = PredicateBuilder::default();

    builder.membership("id", query.ids.clone());

    if !query.summaries.is_empty() {
        let pattern = builder.bind(Value::from(query.summaries.join("|")));
        builder.clauses.push(format!("summary ~* {}", pattern));
    }

    builder.membership("outcome", wire_names(&query.outcomes, Outcome::as_str));
    builder.membership("analysis", wire_names(&query.analyses, Analysis::as_str));
    builder.membership("resolution", wire_names(&query.resolutions, Resolution::as_str));

    builder.compare("created", "<", query.created_before);
    builder.compare("created", ">", query.created_after);
    builder.compare("modified", "<", query.modified_before);
    builder.compare("modified", ">", query.modified_after);

    if !query.docs.is_empty() {
        let containments: Vec<String> = query
            .docs
            .iter()
            .map(|doc| {
                let placeholder = builder.bind(Value::from(serde_json::Value::Object(doc.clone())));
                format!("doc @> {}::jsonb", placeholder)
            })
            .collect();
        builder
            .clauses
            .push(format!("({})", containments.join(" OR ")));
    }

    let (predicate, params) = builder.finish();

    CompiledQuery {
        predicate,
        params,
        order: format!("ORDER BY {} DESC, id DESC", sort.column()),
        pagination: pagination_clause(page),
    }
}

fn wire_names<T>(values: &[T], name: fn(&T) -> &'static str) -> Vec<String> {
    values.iter().map(|v| name(v).to_string()).collect()
}

fn pagination_clause(page: Page) -> String {
    match (page.limit, page.offset) {
        (Some(limit), 0) => format!("LIMIT {}", limit),
        (Some(limit), offset) => format!("LIMIT {} OFFSET {}", limit, offset),
        (None, 0) => String::new(),
        (None, offset) => format!("OFFSET {}", offset),
    }
}
