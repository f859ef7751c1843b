//! Attest Application - Ports and response validators
//!
//! Validators run inside a host test runner's response hook: they read a
//! finished response, emit named assertions, and may persist extracted
//! values through the [`ports::VariableStore`] capability the host injects.

pub mod ports;
pub mod validators;

pub use ports::{AssertionReporter, NullReporter, VariableStore};
pub use validators::{ErrorResponseValidator, UsersListValidator};
