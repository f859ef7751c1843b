//! Response validators.
//!
//! Each validator checks one response contract and produces an ordered
//! [`ValidationReport`](attest_domain::ValidationReport). Validators are
//! synchronous and total: a malformed body becomes a failed assertion,
//! never an error crossing the public boundary.

mod error_response;
mod users_list;

pub use error_response::ErrorResponseValidator;
pub use users_list::UsersListValidator;

use attest_domain::AssertionResult;

/// Name of the JSON well-formedness assertion shared by all validators.
pub(crate) const JSON_VALID_CHECK: &str = "Response is valid JSON";

/// Builds the leading JSON well-formedness assertion from a parse outcome.
pub(crate) fn json_validity_check(
    parsed: &Result<serde_json::Value, serde_json::Error>,
) -> AssertionResult {
    match parsed {
        Ok(_) => AssertionResult::pass(JSON_VALID_CHECK),
        Err(e) => AssertionResult::fail(JSON_VALID_CHECK, format!("Body is not valid JSON: {e}")),
    }
}
