//! User record shape for the list-users endpoint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::response::json_type_name;

/// A user object as returned by the list-users endpoint.
///
/// `created_at` is returned by the API but is not part of the asserted
/// shape, so it stays optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Numeric user id.
    pub id: i64,
    /// Account email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Whether the account has admin privileges.
    pub is_admin: bool,
    /// Creation timestamp as returned by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A user field that is missing or has the wrong JSON type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Expected user field '{field}' to be {expected}, got {found}")]
pub struct FieldIssue {
    /// Field name.
    pub field: &'static str,
    /// Expected JSON type.
    pub expected: &'static str,
    /// What was actually found.
    pub found: String,
}

/// Required fields and their expected JSON types, checked in order.
const REQUIRED_FIELDS: [(&str, JsonKind); 4] = [
    ("id", JsonKind::Number),
    ("email", JsonKind::String),
    ("name", JsonKind::String),
    ("is_admin", JsonKind::Boolean),
];

#[derive(Debug, Clone, Copy)]
enum JsonKind {
    Number,
    String,
    Boolean,
}

impl JsonKind {
    const fn name(self) -> &'static str {
        match self {
            Self::Number => "a number",
            Self::String => "a string",
            Self::Boolean => "a boolean",
        }
    }

    fn matches(self, value: &serde_json::Value) -> bool {
        match self {
            Self::Number => value.is_number(),
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

/// Checks that a JSON value carries the required user fields.
///
/// Fields are checked in a fixed order and the first problem wins, so a
/// partially-shaped object produces one specific message.
///
/// # Errors
///
/// Returns the first missing or mistyped field.
pub fn check_required_fields(user: &serde_json::Value) -> Result<(), FieldIssue> {
    for (field, kind) in REQUIRED_FIELDS {
        match user.get(field) {
            None => {
                return Err(FieldIssue {
                    field,
                    expected: kind.name(),
                    found: "nothing".to_string(),
                });
            }
            Some(value) if !kind.matches(value) => {
                return Err(FieldIssue {
                    field,
                    expected: kind.name(),
                    found: json_type_name(value).to_string(),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}

impl UserRecord {
    /// Builds a typed record from a JSON value, after shape checking.
    ///
    /// A non-string `created_at` is dropped rather than rejected, since the
    /// field is not part of the asserted shape.
    ///
    /// # Errors
    ///
    /// Returns the first missing or mistyped required field; a fractional
    /// `id` counts as mistyped.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, FieldIssue> {
        check_required_fields(value)?;

        let id = value
            .get("id")
            .and_then(serde_json::Value::as_i64)
            .ok_or_else(|| FieldIssue {
                field: "id",
                expected: "an integer",
                found: "a fractional number".to_string(),
            })?;

        let field_string = |field: &str| {
            value
                .get(field)
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Ok(Self {
            id,
            email: field_string("email"),
            name: field_string("name"),
            is_admin: value
                .get("is_admin")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or_default(),
            created_at: value
                .get("created_at")
                .and_then(serde_json::Value::as_str)
                .map(ToOwned::to_owned),
        })
    }
}
