use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::security::{CredentialError, CredentialOperations};
use crate::storage::ManageTokens;
use crate::AppState;

/// Scheme label expected in `Authorization: Basic <token>`.
///
/// The header carries the signed token itself, not a base64 `user:pass` pair;
/// only the label is borrowed from HTTP Basic auth.
pub const AUTHORIZATION_SCHEME: &str = "Basic";

#[derive(Debug, thiserror::Error)]
pub enum AccessDenied {
    #[error("missing Authorization header")]
    MissingHeader,

    #[error("malformed Authorization header")]
    MalformedHeader,

    #[error("invalid credential: {0}")]
    InvalidCredential(#[from] CredentialError),

    #[error("token is not active")]
    InactiveToken,
}

/// Extract the token from `"<scheme> <token>"`. Exactly one space, case-sensitive scheme.
pub fn parse_authorization(header: &str) -> Option<&str> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(AUTHORIZATION_SCHEME), Some(token), None) => Some(token),
        _ => None,
    }
}

/// Request gate: header structure, then signature/expiry, then registry liveness.
#[derive(Clone)]
pub struct AccessGate {
    credentials: Arc<dyn CredentialOperations>,
    tokens: Arc<dyn ManageTokens>,
}

impl AccessGate {
    pub fn new(credentials: Arc<dyn CredentialOperations>, tokens: Arc<dyn ManageTokens>) -> Self {
        Self { credentials, tokens }
    }

    pub fn admit(&self, header: Option<&str>) -> std::result::Result<(), AccessDenied> {
        let header = header.ok_or(AccessDenied::MissingHeader)?;
        let token = parse_authorization(header).ok_or(AccessDenied::MalformedHeader)?;

        self.credentials.validate_credential(token)?;

        if !self.tokens.is_active_token(token) {
            return Err(AccessDenied::InactiveToken);
        }

        Ok(())
    }
}

/// Route layer guarding protected handlers. The wrapped handler only runs once
/// the gate admits the request.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let admitted = request
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AccessDenied::MalformedHeader))
        .transpose()
        .and_then(|header| state.gate.admit(header));

    if let Err(denied) = admitted {
        return Err(AppError::Authentication(format!(
            "{} {}: {}",
            request.method(),
            request.uri().path(),
            denied
        )));
    }

    Ok(next.run(request).await)
}
