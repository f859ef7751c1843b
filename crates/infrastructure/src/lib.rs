//! Attest Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in
//! the application layer: variable stores a host can hand to validators,
//! and reporters that forward assertion results.

pub mod persistence;
pub mod reporting;

pub use persistence::{FileVariableStore, InMemoryVariableStore, StoreError};
pub use reporting::{CollectingReporter, TracingReporter};
