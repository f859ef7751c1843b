//! Validation of error responses against the common error envelope.

use std::time::Instant;

use attest_domain::response::json_type_name;
use attest_domain::{AssertionResult, ResponseSpec, ValidationReport};
use serde_json::Value;

use crate::ports::AssertionReporter;

use super::json_validity_check;

const ERROR_BODY_CHECK: &str = "Error body: success false and error populated";

/// Validates a rejected request against the API's error envelope.
///
/// The API answers every rejected request with
/// `{ "success": false, "error": "<message>" }` and a 4xx status. Endpoints
/// differ only in the expected status and what the error message should
/// mention (e.g. a 403 must cite the missing admin privileges).
#[derive(Debug, Clone)]
pub struct ErrorResponseValidator {
    /// Status code the endpoint is expected to answer with.
    expected_status: u16,
    /// Fragment the error message must contain, case-insensitively.
    error_fragment: Option<String>,
}

impl ErrorResponseValidator {
    /// Creates a validator expecting the given status code.
    #[must_use]
    pub const fn new(expected_status: u16) -> Self {
        Self {
            expected_status,
            error_fragment: None,
        }
    }

    /// Requires the error message to mention `fragment` (case-insensitive).
    #[must_use]
    pub fn with_error_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.error_fragment = Some(fragment.into());
        self
    }

    /// Runs the validation and returns the ordered report.
    ///
    /// Synchronous and total, like the success-path validation; no store
    /// writes happen here.
    #[must_use]
    pub fn validate<R>(&self, response: &ResponseSpec, reporter: &mut R) -> ValidationReport
    where
        R: AssertionReporter + ?Sized,
    {
        let start = Instant::now();
        let mut results = Vec::with_capacity(3);

        let parsed = response.parse_json();

        let json_check = json_validity_check(&parsed);
        reporter.report(&json_check);
        results.push(json_check);

        let status_name = format!("Status code is {}", self.expected_status);
        let status_check = if response.status == self.expected_status {
            AssertionResult::pass(status_name)
        } else {
            AssertionResult::fail(
                status_name,
                format!(
                    "Expected status {}, got {}",
                    self.expected_status, response.status
                ),
            )
        };
        reporter.report(&status_check);
        results.push(status_check);

        let body_check = match &parsed {
            Err(e) => AssertionResult::fail(
                ERROR_BODY_CHECK,
                format!("Expected JSON body for error response, but parsing failed: {e}"),
            ),
            Ok(body) => match self.check_envelope(body) {
                Ok(()) => AssertionResult::pass(ERROR_BODY_CHECK),
                Err(message) => AssertionResult::fail(ERROR_BODY_CHECK, message),
            },
        };
        reporter.report(&body_check);
        results.push(body_check);

        ValidationReport::new(results, Vec::new(), start.elapsed().as_millis() as u64)
    }

    /// Checks the error envelope, first failing sub-check wins.
    fn check_envelope(&self, body: &Value) -> Result<(), String> {
        match body.get("success") {
            None => return Err("Missing field 'success'".to_string()),
            Some(Value::Bool(false)) => {}
            Some(other) => {
                return Err(format!(
                    "Expected field 'success' to equal false, got {other}"
                ));
            }
        }

        let error = match body.get("error") {
            None => return Err("Missing field 'error'".to_string()),
            Some(Value::String(message)) => message,
            Some(other) => {
                return Err(format!(
                    "Expected field 'error' to be a string, got {}",
                    json_type_name(other)
                ));
            }
        };

        if error.trim().is_empty() {
            return Err("Expected field 'error' to be non-empty".to_string());
        }

        if let Some(fragment) = &self.error_fragment {
            if !error.to_lowercase().contains(&fragment.to_lowercase()) {
                return Err(format!(
                    "Expected error message to mention '{fragment}', got '{error}'"
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use crate::ports::NullReporter;

    use super::*;

    fn json_response(status: u16, body: &str) -> ResponseSpec {
        ResponseSpec::new(status, HashMap::new(), body.as_bytes().to_vec())
    }

    #[test]
    fn test_admin_required_contract_passes() {
        let response = json_response(403, r#"{"success": false, "error": "Admin privileges required"}"#);
        let validator = ErrorResponseValidator::new(403).with_error_fragment("admin");

        let report = validator.validate(&response, &mut NullReporter);

        assert!(report.all_passed());
        assert_eq!(report.total, 3);
        assert_eq!(report.results[1].name, "Status code is 403");
    }

    #[test]
    fn test_wrong_status_is_cited() {
        let response = json_response(401, r#"{"success": false, "error": "Token is missing"}"#);
        let validator = ErrorResponseValidator::new(403);

        let report = validator.validate(&response, &mut NullReporter);

        assert_eq!(
            report.results[1].message.as_deref(),
            Some("Expected status 403, got 401")
        );
    }

    #[test]
    fn test_success_true_fails() {
        let response = json_response(404, r#"{"success": true, "error": "User not found"}"#);
        let validator = ErrorResponseValidator::new(404);

        let report = validator.validate(&response, &mut NullReporter);

        assert_eq!(
            report.results[2].message.as_deref(),
            Some("Expected field 'success' to equal false, got true")
        );
    }

    #[test]
    fn test_missing_error_field_fails() {
        let response = json_response(404, r#"{"success": false}"#);
        let validator = ErrorResponseValidator::new(404);

        let report = validator.validate(&response, &mut NullReporter);

        assert_eq!(
            report.results[2].message.as_deref(),
            Some("Missing field 'error'")
        );
    }

    #[test]
    fn test_empty_error_message_fails() {
        let response = json_response(404, r#"{"success": false, "error": "  "}"#);
        let validator = ErrorResponseValidator::new(404);

        let report = validator.validate(&response, &mut NullReporter);

        assert_eq!(
            report.results[2].message.as_deref(),
            Some("Expected field 'error' to be non-empty")
        );
    }

    #[test]
    fn test_error_fragment_is_case_insensitive() {
        let response = json_response(403, r#"{"success": false, "error": "ADMIN privileges required"}"#);
        let validator = ErrorResponseValidator::new(403).with_error_fragment("admin");

        let report = validator.validate(&response, &mut NullReporter);

        assert!(report.all_passed());
    }

    #[test]
    fn test_fragment_mismatch_shows_both_sides() {
        let response = json_response(401, r#"{"success": false, "error": "Token expired"}"#);
        let validator = ErrorResponseValidator::new(401).with_error_fragment("missing");

        let report = validator.validate(&response, &mut NullReporter);

        assert_eq!(
            report.results[2].message.as_deref(),
            Some("Expected error message to mention 'missing', got 'Token expired'")
        );
    }

    #[test]
    fn test_unparsable_body_fails_json_and_envelope_checks() {
        let response = json_response(500, "<html>Internal Server Error</html>");
        let validator = ErrorResponseValidator::new(500);

        let report = validator.validate(&response, &mut NullReporter);

        assert!(!report.results[0].passed);
        assert!(report.results[1].passed);
        assert!(
            report.results[2]
                .message
                .as_deref()
                .unwrap()
                .starts_with("Expected JSON body for error response, but parsing failed:")
        );
    }
}
