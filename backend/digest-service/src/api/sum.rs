use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    middleware,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::middleware::require_auth;
use crate::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Documents of any size are accepted; serde_json still caps nesting at 128.
        .route("/sum", post(sum).layer(DefaultBodyLimit::disable()))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SumResponse {
    pub result: String,
}

async fn sum(State(state): State<AppState>, body: Bytes) -> Result<Json<SumResponse>> {
    let data: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::InvalidInput(format!("invalid JSON document: {}", e)))?;

    let result = state
        .operations
        .sum(&data)
        .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;

    Ok(Json(SumResponse { result }))
}
