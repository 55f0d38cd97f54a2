//! HTTP API test suite.
//!
//! Exercises every endpoint against the in-memory store; no database needed.
//!
//! Run with: cargo test --test api

mod test_helpers;

mod test_create;
mod test_query;
