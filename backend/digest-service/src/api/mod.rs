mod auth;
mod sum;

pub use auth::JwtResponse;
pub use sum::SumResponse;

use axum::Router;
use crate::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(sum::routes(state))
}
