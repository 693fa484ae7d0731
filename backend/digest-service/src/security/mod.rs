//! Credential issuance and verification.

pub mod jwt;

pub use jwt::{Claims, CredentialError, CredentialOperations, JwtAuthority};
