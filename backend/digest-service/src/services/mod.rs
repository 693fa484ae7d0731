mod auth_service;
mod digest_service;

pub use auth_service::*;
pub use digest_service::*;
