use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Username/password pair submitted to `POST /auth`.
///
/// Missing fields deserialize as empty strings so they surface as
/// [`UserError::EmptyFields`] rather than a parse failure.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct User {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserError {
    #[error("invalid user data, empty fields")]
    EmptyFields,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields must be non-empty before a credential can be issued.
    pub fn validate_user(&self) -> Result<(), UserError> {
        self.validate().map_err(|_| UserError::EmptyFields)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
