//! Business logic services.

pub mod query_token;
pub mod splitter;

pub use query_token::{decode_query, encode_query};
pub use splitter::split_test;
