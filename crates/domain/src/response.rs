//! HTTP response input type
//!
//! The host test runner executes the request and hands the finished
//! response to a validator as a `ResponseSpec`. Validators only read it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A finished HTTP response as received from the host test runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// HTTP status code.
    pub status: u16,
    /// Response headers as a map.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Response body as text.
    pub body: String,
    /// Content-Type header value (extracted for convenience).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl ResponseSpec {
    /// Creates a `ResponseSpec` from raw response data.
    ///
    /// Body bytes that are not valid UTF-8 are converted lossily; the
    /// replacement characters will then fail JSON parsing downstream, which
    /// is the behavior validators expect for a garbled body.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        let content_type = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.clone());

        let body = String::from_utf8(body)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());

        Self {
            status,
            headers,
            body,
            content_type,
        }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns true if the content type indicates JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_ref()
            .is_some_and(|ct| ct.contains("application/json") || ct.contains("+json"))
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Attempts to parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the decode error so validators can cite it in an assertion
    /// message. The error never propagates past a validator.
    pub fn parse_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Returns a short name for a JSON value's type, for assertion messages.
#[must_use]
pub const fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
