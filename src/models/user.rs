//! User record layout in the store.
//!
//! Each user is one hash at `user:<username>` holding the fields below. The
//! username itself lives only in the key.

use std::collections::HashMap;

use serde::Serialize;

/// Namespace prefix for user keys.
pub const USER_KEY_PREFIX: &str = "user:";

/// Pattern matching every user key.
pub const USER_KEY_PATTERN: &str = "user:*";

pub const FIELD_FIRSTNAME: &str = "firstname";
pub const FIELD_LASTNAME: &str = "lastname";
pub const FIELD_EMAIL: &str = "email";

/// Store key for `username`.
pub fn user_key(username: &str) -> String {
    format!("{}{}", USER_KEY_PREFIX, username)
}

/// Recovers the username from a store key, if it is a user key.
pub fn username_from_key(key: &str) -> Option<&str> {
    key.strip_prefix(USER_KEY_PREFIX)
}

// == User ==
/// A user as returned by the API.
///
/// Fields are optional because they are written one at a time; a record
/// interrupted mid-write is returned with whatever fields it has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    /// Builds a user from its stored hash.
    pub fn from_fields(username: impl Into<String>, mut fields: HashMap<String, String>) -> Self {
        Self {
            username: username.into(),
            firstname: fields.remove(FIELD_FIRSTNAME),
            lastname: fields.remove(FIELD_LASTNAME),
            email: fields.remove(FIELD_EMAIL),
        }
    }
}

// == New User ==
/// A fully validated creation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

impl NewUser {
    /// Field/value pairs in the order they are written.
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            (FIELD_FIRSTNAME, self.firstname.as_str()),
            (FIELD_LASTNAME, self.lastname.as_str()),
            (FIELD_EMAIL, self.email.as_str()),
        ]
    }
}
