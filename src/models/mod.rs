//! Domain models for the OAR service.

pub mod oar;
pub mod test_query;

// Re-export commonly used types
pub use oar::{Analysis, Outcome, Resolution};
pub use test::{Doc, Test};
pub use test_query::{
    BulkDeleteResponse, BulkParams, BulkPatchResponse, DEFAULT_LIMIT, ListTestsParams, MAX_LIMIT,
    TestQuery, TestQueryResponse, TestRef,
};
