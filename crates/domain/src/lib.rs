//! Attest Domain - Core validation types
//!
//! This crate defines the domain model for Attest response validation.
//! All types here are pure Rust with no I/O dependencies.

pub mod assertion;
pub mod response;
pub mod user;

pub use assertion::{AssertionResult, ValidationReport};
pub use response::{ResponseSpec, json_type_name};
pub use user::{FieldIssue, UserRecord, check_required_fields};
