//! OAR service library.
//!
//! Records test executions and tracks each one through the
//! Outcome/Analysis/Resolution lifecycle: validation, ingestion of flat JSON
//! bodies, partial updates, filtered queries and bulk mutation.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
