use std::sync::Arc;
use tracing::{info, warn};

use crate::models::{User, UserError};
use crate::security::{CredentialError, CredentialOperations};
use crate::storage::ManageTokens;

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("error validating user: {0}")]
    InvalidUser(#[from] UserError),

    #[error("error creating JWT: {0}")]
    CredentialCreation(#[source] CredentialError),
}

pub trait Authorizer: Send + Sync {
    fn create_auth(&self, user: &User) -> Result<String, AuthServiceError>;
}

/// Validates a user, issues a credential and registers it as active.
pub struct AuthService {
    credentials: Arc<dyn CredentialOperations>,
    tokens: Arc<dyn ManageTokens>,
}

impl AuthService {
    pub fn new(credentials: Arc<dyn CredentialOperations>, tokens: Arc<dyn ManageTokens>) -> Self {
        Self { credentials, tokens }
    }
}

impl Authorizer for AuthService {
    fn create_auth(&self, user: &User) -> Result<String, AuthServiceError> {
        user.validate_user()?;

        let token = self
            .credentials
            .create_credential(user)
            .map_err(AuthServiceError::CredentialCreation)?;

        // A failed registry write is not propagated: the caller still gets the
        // token, but the access gate will refuse it until it is registered.
        if !self.tokens.add_token(&token) {
            warn!(user = %user.username, "Failed to register issued token");
            return Ok(token);
        }

        info!(user = %user.username, "Issued credential");
        Ok(token)
    }
}
