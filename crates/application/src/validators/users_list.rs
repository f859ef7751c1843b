//! Validation of the list-users success response.

use std::time::Instant;

use attest_domain::response::json_type_name;
use attest_domain::{AssertionResult, ResponseSpec, ValidationReport, user};
use serde_json::Value;

use crate::ports::{AssertionReporter, VariableStore};

use super::json_validity_check;

const USERS_LISTED_CHECK: &str = "200 OK: users listed and data valid";
const UNEXPECTED_STATUS_CHECK: &str = "Unexpected status code";

/// Default store key for the extracted user id.
const DEFAULT_STORE_KEY: &str = "user_id";

/// Validates a list-users response and captures the last user's id.
///
/// For a 200 response the body must be the success envelope
/// `{ "success": true, "data": [user, ...], "count"?: n }`. An empty
/// `data` array is always a failure for this endpoint, even though it is
/// structurally valid. Any other status code fails outright.
///
/// After the assertions are emitted, the id of the **last** element of
/// `data` is written to the session store so later test steps can address
/// that user. The write happens whenever the id is present, independent of
/// the assertion verdict.
#[derive(Debug, Clone)]
pub struct UsersListValidator {
    /// Store key the extracted id is saved under.
    store_key: String,
}

impl Default for UsersListValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl UsersListValidator {
    /// Creates a validator saving under the default `user_id` key.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store_key: DEFAULT_STORE_KEY.to_string(),
        }
    }

    /// Overrides the store key for the extracted id.
    #[must_use]
    pub fn with_store_key(mut self, key: impl Into<String>) -> Self {
        self.store_key = key.into();
        self
    }

    /// Runs the validation and returns the ordered report.
    ///
    /// Every emitted assertion is also forwarded to `reporter` as it is
    /// produced. The operation is synchronous and never fails: decode
    /// errors surface only as failed assertions.
    #[must_use]
    pub fn validate<S, R>(
        &self,
        response: &ResponseSpec,
        store: &mut S,
        reporter: &mut R,
    ) -> ValidationReport
    where
        S: VariableStore + ?Sized,
        R: AssertionReporter + ?Sized,
    {
        let start = Instant::now();
        let mut results = Vec::with_capacity(2);
        let mut warnings = Vec::new();

        let parsed = response.parse_json();

        let json_check = json_validity_check(&parsed);
        reporter.report(&json_check);
        results.push(json_check);

        if response.status == 200 {
            let users_check = match &parsed {
                Err(e) => AssertionResult::fail(
                    USERS_LISTED_CHECK,
                    format!("Expected JSON body for 200 response, but parsing failed: {e}"),
                ),
                Ok(body) => match check_listing(body) {
                    Ok(()) => AssertionResult::pass(USERS_LISTED_CHECK),
                    Err(message) => AssertionResult::fail(USERS_LISTED_CHECK, message),
                },
            };
            reporter.report(&users_check);
            results.push(users_check);

            // Capture runs regardless of the verdict above: a count mismatch
            // still yields a usable id for the next test step.
            match last_user_id(parsed.as_ref().ok()) {
                Some(id) => {
                    tracing::info!("Saved {}: {id}", self.store_key);
                    store.set(&self.store_key, id);
                }
                None => {
                    let warning = format!("No {} to save (data array empty)", self.store_key);
                    tracing::warn!("{warning}");
                    warnings.push(warning);
                }
            }
        } else {
            let status_check = AssertionResult::fail(
                UNEXPECTED_STATUS_CHECK,
                format!("Unexpected status: {}", response.status),
            );
            reporter.report(&status_check);
            results.push(status_check);
        }

        ValidationReport::new(results, warnings, start.elapsed().as_millis() as u64)
    }
}

/// Checks the success envelope, first failing sub-check wins.
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
fn check_listing(body: &Value) -> Result<(), String> {
    match body.get("success") {
        None => return Err("Missing field 'success'".to_string()),
        Some(Value::Bool(true)) => {}
        Some(other) => return Err(format!("Expected field 'success' to equal true, got {other}")),
    }

    let data = match body.get("data") {
        None => return Err("Missing field 'data'".to_string()),
        Some(Value::Array(users)) => users,
        Some(other) => {
            return Err(format!(
                "Expected field 'data' to be an array, got {}",
                json_type_name(other)
            ));
        }
    };

    if let Some(count) = body.get("count") {
        let Some(count) = count.as_f64() else {
            return Err(format!(
                "Expected field 'count' to be a number, got {}",
                json_type_name(count)
            ));
        };
        let len = data.len();
        if count != len as f64 {
            return Err(format!("Expected count {count} to equal data length {len}"));
        }
    }

    match data.first() {
        Some(sample) => user::check_required_fields(sample).map_err(|issue| issue.to_string()),
        None => Err("Expected at least one user in data array".to_string()),
    }
}

/// Extracts the id of the last element of `data`, when there is one.
fn last_user_id(body: Option<&Value>) -> Option<Value> {
    body.and_then(|body| body.get("data"))
        .and_then(Value::as_array)
        .filter(|users| !users.is_empty())
        .and_then(|users| users.last())
        .and_then(|last| last.get("id"))
        .cloned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Default)]
    struct MapStore {
        values: HashMap<String, Value>,
    }

    impl VariableStore for MapStore {
        fn get(&self, key: &str) -> Option<Value> {
            self.values.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: Value) {
            self.values.insert(key.to_string(), value);
        }
    }

    #[derive(Debug, Default)]
    struct RecordingReporter {
        seen: Vec<AssertionResult>,
    }

    impl AssertionReporter for RecordingReporter {
        fn report(&mut self, result: &AssertionResult) {
            self.seen.push(result.clone());
        }
    }

    fn json_response(status: u16, body: &str) -> ResponseSpec {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        ResponseSpec::new(status, headers, body.as_bytes().to_vec())
    }

    fn validate(response: &ResponseSpec, store: &mut MapStore) -> ValidationReport {
        UsersListValidator::new().validate(response, store, &mut RecordingReporter::default())
    }

    #[test]
    fn test_single_user_without_count_passes() {
        let response = json_response(
            200,
            r#"{"success": true, "data": [{"id": 7, "email": "a@b.com", "name": "A", "is_admin": false}]}"#,
        );
        let mut store = MapStore::default();

        let report = validate(&response, &mut store);

        assert!(report.all_passed());
        assert_eq!(report.total, 2);
        assert!(report.warnings.is_empty());
        assert_eq!(store.get("user_id"), Some(json!(7)));
    }

    #[test]
    fn test_last_user_id_is_saved_not_first() {
        let response = json_response(
            200,
            r#"{"success": true, "count": 2, "data": [
                {"id": 7, "email": "a@b.com", "name": "A", "is_admin": false},
                {"id": 42, "email": "z@b.com", "name": "Z", "is_admin": true}
            ]}"#,
        );
        let mut store = MapStore::default();

        let report = validate(&response, &mut store);

        assert!(report.all_passed());
        assert_eq!(store.get("user_id"), Some(json!(42)));
    }

    #[test]
    fn test_unparsable_body_fails_both_checks() {
        let response = json_response(200, "not json at all");
        let mut store = MapStore::default();

        let report = validate(&response, &mut store);

        assert_eq!(report.failed, 2);
        assert!(!report.results[0].passed);
        assert!(
            report.results[1]
                .message
                .as_deref()
                .unwrap()
                .starts_with("Expected JSON body for 200 response, but parsing failed:")
        );
        assert_eq!(store.get("user_id"), None);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_empty_data_is_a_hard_failure() {
        let response = json_response(200, r#"{"success": true, "data": [], "count": 0}"#);
        let mut store = MapStore::default();

        let report = validate(&response, &mut store);

        assert_eq!(report.failed, 1);
        assert_eq!(
            report.results[1].message.as_deref(),
            Some("Expected at least one user in data array")
        );
        assert_eq!(store.get("user_id"), None);
        assert_eq!(
            report.warnings,
            vec!["No user_id to save (data array empty)".to_string()]
        );
    }

    #[test]
    fn test_count_mismatch_fails_but_id_is_still_saved() {
        let response = json_response(
            200,
            r#"{"success": true, "count": 3, "data": [
                {"id": 7, "email": "a@b.com", "name": "A", "is_admin": false},
                {"id": 42, "email": "z@b.com", "name": "Z", "is_admin": true}
            ]}"#,
        );
        let mut store = MapStore::default();

        let report = validate(&response, &mut store);

        assert_eq!(
            report.results[1].message.as_deref(),
            Some("Expected count 3 to equal data length 2")
        );
        assert_eq!(store.get("user_id"), Some(json!(42)));
    }

    #[test]
    fn test_success_false_fails_with_specific_message() {
        let response = json_response(200, r#"{"success": false, "data": []}"#);
        let mut store = MapStore::default();

        let report = validate(&response, &mut store);

        assert_eq!(
            report.results[1].message.as_deref(),
            Some("Expected field 'success' to equal true, got false")
        );
    }

    #[test]
    fn test_data_not_an_array_fails_with_type_name() {
        let response = json_response(200, r#"{"success": true, "data": {"id": 7}}"#);
        let mut store = MapStore::default();

        let report = validate(&response, &mut store);

        assert_eq!(
            report.results[1].message.as_deref(),
            Some("Expected field 'data' to be an array, got an object")
        );
    }

    #[test]
    fn test_sample_field_issue_is_cited() {
        let response = json_response(
            200,
            r#"{"success": true, "data": [{"id": 7, "email": "a@b.com", "name": "A"}]}"#,
        );
        let mut store = MapStore::default();

        let report = validate(&response, &mut store);

        assert_eq!(
            report.results[1].message.as_deref(),
            Some("Expected user field 'is_admin' to be a boolean, got nothing")
        );
        // The sample lacks nothing the capture needs, so the id still lands.
        assert_eq!(store.get("user_id"), Some(json!(7)));
    }

    #[test]
    fn test_non_200_fails_without_shape_checks() {
        let response = json_response(404, r#"{"success": false, "error": "User not found"}"#);
        let mut store = MapStore::default();

        let report = validate(&response, &mut store);

        assert_eq!(report.total, 2);
        assert!(report.results[0].passed);
        assert_eq!(report.results[1].name, "Unexpected status code");
        assert_eq!(
            report.results[1].message.as_deref(),
            Some("Unexpected status: 404")
        );
        assert_eq!(store.get("user_id"), None);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let response = json_response(
            200,
            r#"{"success": true, "data": [{"id": 9, "email": "a@b.com", "name": "A", "is_admin": true}]}"#,
        );
        let mut store = MapStore::default();

        let first = validate(&response, &mut store);
        let second = validate(&response, &mut store);

        assert_eq!(first.results, second.results);
        assert_eq!(store.get("user_id"), Some(json!(9)));
    }

    #[test]
    fn test_custom_store_key() {
        let response = json_response(
            200,
            r#"{"success": true, "data": [{"id": 5, "email": "a@b.com", "name": "A", "is_admin": false}]}"#,
        );
        let mut store = MapStore::default();
        let mut reporter = RecordingReporter::default();

        let validator = UsersListValidator::new().with_store_key("admin_id");
        let report = validator.validate(&response, &mut store, &mut reporter);

        assert!(report.all_passed());
        assert_eq!(store.get("admin_id"), Some(json!(5)));
        assert_eq!(store.get("user_id"), None);
    }

    #[test]
    fn test_reporter_receives_results_in_order() {
        let response = json_response(404, "{}");
        let mut store = MapStore::default();
        let mut reporter = RecordingReporter::default();

        let report = UsersListValidator::new().validate(&response, &mut store, &mut reporter);

        assert_eq!(reporter.seen, report.results);
    }
}
