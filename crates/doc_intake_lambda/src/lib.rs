//! AWS-oriented adapters and handlers for document intake.
//!
//! This crate owns runtime integration details (the OCR queue Lambda handler,
//! the upload presign API and storage adapters). Contracts and configuration
//! live in `doc_intake_core`.

pub mod adapters;
pub mod api;
pub mod handlers;
pub mod observability;
