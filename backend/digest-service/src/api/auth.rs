use axum::{body::Bytes, extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::User;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/auth", post(create_auth))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtResponse {
    pub jwt: String,
}

/// Issue a credential for a username/password pair.
///
/// The body is decoded by hand so that every payload problem maps to a bare
/// 400, whatever the request's content type.
async fn create_auth(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<JwtResponse>)> {
    let user: User = serde_json::from_slice(&body)
        .map_err(|e| AppError::InvalidInput(format!("invalid user payload: {}", e)))?;

    let jwt = state
        .auth
        .create_auth(&user)
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(JwtResponse { jwt })))
}
