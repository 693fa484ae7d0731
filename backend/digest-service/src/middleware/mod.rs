mod auth;

pub use auth::*;
