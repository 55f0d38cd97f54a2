//! Splits a flat JSON test body into typed OAR fields and a free-form doc.
//!
//! Clients post a single object mixing known fields with arbitrary metadata:
//!
//! ```json
//! {"summary": "login", "outcome": "Failed", "browser": "firefox", "build": 42}
//! ```
//!
//! The body is decoded into a map of every top-level key. Reserved keys, in
//! any casing, are moved out under their lowercase name and decoded into the
//! typed fields; what remains becomes the test's doc.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::{AppError, AppResult};
use crate::models::{Analysis, Doc, Outcome, Resolution, Test};

/// Top-level keys owned by the typed fields. Matched case-insensitively.
pub const RESERVED_KEYS: [&str; 7] = [
    "id",
    "summary",
    "outcome",
    "analysis",
    "resolution",
    "created",
    "modified",
];

/// Key holding the computed doc; clients may never send it.
const DOC_KEY: &str = "doc";

/// Typed view of the reserved keys. Enum fields stay strings here so an
/// unknown spelling can be reported as the matching `Invalid*` error.
#[derive(Debug, Default, Deserialize)]
struct TestFields {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    outcome: Option<String>,
    #[serde(default)]
    analysis: Option<String>,
    #[serde(default)]
    resolution: Option<String>,
}

/// Decode a raw JSON body into a [`Test`].
///
/// The result is neither cleaned nor validated.
pub fn split_test(body: &[u8]) -> AppResult<Test> {
    let mut doc: Doc = serde_json::from_slice(body)?;

    if let Some(key) = doc.keys().find(|key| key.eq_ignore_ascii_case(DOC_KEY)) {
        return Err(AppError::ReservedFieldConflict(key.clone()));
    }

    // When one field arrives under several casings, the last one wins.
    let mut typed = Doc::new();
    doc.retain(|key, value| {
        if is_reserved(key) {
            typed.insert(key.to_ascii_lowercase(), value.take());
            false
        } else {
            true
        }
    });
    let fields: TestFields = serde_json::from_value(JsonValue::Object(typed))?;

    Ok(Test {
        id: fields.id,
        summary: fields.summary.unwrap_or_default(),
        outcome: parse_outcome(fields.outcome)?,
        analysis: parse_analysis(fields.analysis)?,
        resolution: parse_resolution(fields.resolution)?,
        created: None,
        modified: None,
        doc,
    })
}

/// Whether `key` names a typed field.
pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS
        .iter()
        .any(|reserved| key.eq_ignore_ascii_case(reserved))
}

// An empty string is the same as an absent field.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_outcome(value: Option<String>) -> AppResult<Option<Outcome>> {
    non_empty(value)
        .map(|v| {
            Outcome::parse(&v).ok_or_else(|| {
                AppError::InvalidOutcome(format!(
                    "'{}', must be one of outcomes: {}, {}",
                    v,
                    Outcome::Passed,
                    Outcome::Failed
                ))
            })
        })
        .transpose()
}

fn parse_analysis(value: Option<String>) -> AppResult<Option<Analysis>> {
    non_empty(value)
        .map(|v| {
            Analysis::parse(&v).ok_or_else(|| {
                let all: Vec<&str> = Analysis::ALL.iter().map(|a| a.as_str()).collect();
                AppError::InvalidAnalysis(format!(
                    "'{}', must be one of analyses: {}",
                    v,
                    all.join(", ")
                ))
            })
        })
        .transpose()
}

fn parse_resolution(value: Option<String>) -> AppResult<Option<Resolution>> {
    non_empty(value)
        .map(|v| {
            Resolution::parse(&v).ok_or_else(|| {
                let all: Vec<&str> = Resolution::ALL.iter().map(|r| r.as_str()).collect();
                AppError::InvalidResolution(format!(
                    "'{}', must be one of resolutions: {}",
                    v,
                    all.join(", ")
                ))
            })
        })
        .transpose()
}
