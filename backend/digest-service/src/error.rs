use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Request-boundary error. Responses carry the status code only.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::InvalidInput(msg) => tracing::debug!("Rejected request: {}", msg),
            AppError::Authentication(msg) => tracing::warn!("Authentication failed: {}", msg),
            AppError::Internal(e) => tracing::error!("Internal error: {:?}", e),
        }

        self.status_code().into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
