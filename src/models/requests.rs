//! Request DTOs for the user API
//!
//! Defines the structure of incoming HTTP request bodies. Every field is
//! optional at the parsing stage so that missing values surface as
//! validation errors rather than parse errors.
//!
//! Field values are read leniently: numbers and `true` are kept as their
//! text, while `null`, `false`, zero, arrays and objects count as absent.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::user::{NewUser, FIELD_EMAIL, FIELD_FIRSTNAME, FIELD_LASTNAME};

/// Request body for POST /user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default, deserialize_with = "scalar_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub firstname: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub lastname: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub email: Option<String>,
}

impl CreateUserRequest {
    /// Returns the validated user, or None if any field is missing or empty.
    pub fn into_new_user(self) -> Option<NewUser> {
        Some(NewUser {
            username: present(self.username)?,
            firstname: present(self.firstname)?,
            lastname: present(self.lastname)?,
            email: present(self.email)?,
        })
    }
}

/// Request body for PUT /user/:username
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "scalar_string")]
    pub firstname: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub lastname: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    /// Field/value pairs to write. Absent and empty values are skipped.
    pub fn changes(&self) -> Vec<(&'static str, &str)> {
        [
            (FIELD_FIRSTNAME, &self.firstname),
            (FIELD_LASTNAME, &self.lastname),
            (FIELD_EMAIL, &self.email),
        ]
        .into_iter()
        .filter_map(|(field, value)| match value.as_deref() {
            Some(v) if !v.is_empty() => Some((field, v)),
            _ => None,
        })
        .collect()
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Reads a JSON scalar as text. `default` on the field still covers a
/// missing key, since `deserialize_with` only runs when the key is present.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Some(Value::Bool(true)) => Some("true".to_string()),
        _ => None,
    })
}
