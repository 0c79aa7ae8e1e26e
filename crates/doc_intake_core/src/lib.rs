//! Shared document intake domain primitives.
//!
//! This crate owns the invocation and upload contracts plus configuration
//! values. It intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod config;
pub mod contract;
pub mod storage_keys;
