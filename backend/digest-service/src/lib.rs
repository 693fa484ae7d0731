//! # Digest Service
//!
//! Issues HS256 credentials for username/password pairs (`POST /auth`) and
//! returns the SHA-256 digest of the integer sum of every number in a JSON
//! document (`POST /sum`) to callers presenting a live credential.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod security;
pub mod services;
pub mod storage;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::middleware::AccessGate;
use crate::security::{CredentialOperations, JwtAuthority};
use crate::services::{AuthService, Authorizer, DigestService, Operations};
use crate::storage::{ManageTokens, TokenRegistry};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn Authorizer>,
    pub operations: Arc<dyn Operations>,
    pub gate: AccessGate,
}

impl AppState {
    /// Wire the credential authority and a fresh token registry shared by the
    /// authorization service and the access gate.
    pub fn from_config(config: &Config) -> Self {
        let authority: Arc<dyn CredentialOperations> = Arc::new(JwtAuthority::new(&config.jwt));
        let registry: Arc<dyn ManageTokens> = Arc::new(TokenRegistry::new());

        Self {
            auth: Arc::new(AuthService::new(authority.clone(), registry.clone())),
            operations: Arc::new(DigestService::new()),
            gate: AccessGate::new(authority, registry),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(api::routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
