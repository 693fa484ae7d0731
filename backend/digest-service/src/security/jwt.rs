//! Signed, time-bounded credentials (HS256 JWT)
//!
//! The accepted algorithm list is pinned to HS256: a token whose header
//! declares any other algorithm fails with `SignatureMismatch` before its
//! signature is looked at.

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, TokenData,
    Validation,
};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::models::User;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims carried by an issued credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub authorized: bool,
    /// Subject (username)
    pub user_id: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("signature or signing method mismatch: {0}")]
    SignatureMismatch(String),

    #[error("expired or invalid claims: {0}")]
    ExpiredOrInvalidClaims(String),
}

impl From<jsonwebtoken::errors::Error> for CredentialError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        let msg = err.to_string();
        match err.kind() {
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => CredentialError::Malformed(msg),
            ErrorKind::InvalidSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm
            | ErrorKind::InvalidKeyFormat => CredentialError::SignatureMismatch(msg),
            _ => CredentialError::ExpiredOrInvalidClaims(msg),
        }
    }
}

/// Credential Authority seam used by the authorization service and the access gate.
pub trait CredentialOperations: Send + Sync {
    fn create_credential(&self, user: &User) -> Result<String, CredentialError>;
    fn validate_credential(&self, token: &str) -> Result<(), CredentialError>;
}

/// HS256 credential authority keyed by the process secret
#[derive(Clone)]
pub struct JwtAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Option<chrono::Duration>,
    validation: Validation,
}

impl JwtAuthority {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            expiry: config.expiry(),
            validation,
        }
    }

    /// Parse and verify a token, returning its claims.
    pub fn verify(&self, token: &str) -> Result<TokenData<Claims>, CredentialError> {
        Ok(decode::<Claims>(token, &self.decoding_key, &self.validation)?)
    }
}

impl CredentialOperations for JwtAuthority {
    fn create_credential(&self, user: &User) -> Result<String, CredentialError> {
        let exp = self
            .expiry
            .and_then(|expiry| Utc::now().checked_add_signed(expiry))
            .ok_or_else(|| CredentialError::Signing("token expiry out of range".to_string()))?;

        let claims = Claims {
            authorized: true,
            user_id: user.username.clone(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| CredentialError::Signing(e.to_string()))
    }

    fn validate_credential(&self, token: &str) -> Result<(), CredentialError> {
        self.verify(token).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "jdnfksdmfksd";

    fn authority() -> JwtAuthority {
        JwtAuthority::new(&JwtConfig {
            secret: SECRET.to_string(),
            expiry_minutes: 60,
        })
    }

    fn forge(claims: &Claims, algorithm: Algorithm, secret: &str) -> String {
        encode(
            &Header::new(algorithm),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_create_and_validate() {
        let authority = authority();
        let token = authority
            .create_credential(&User::new("qwerty", "mnbvc"))
            .unwrap();

        assert!(authority.validate_credential(&token).is_ok());

        let claims = authority.verify(&token).unwrap().claims;
        assert!(claims.authorized);
        assert_eq!(claims.user_id, "qwerty");

        let remaining = claims.exp - Utc::now().timestamp();
        assert!(remaining > 59 * 60 && remaining <= 60 * 60);
    }

    #[test]
    fn test_unrepresentable_expiry_is_signing_error() {
        for expiry_minutes in [1_000_000_000_000, u64::MAX] {
            let authority = JwtAuthority::new(&JwtConfig {
                secret: SECRET.to_string(),
                expiry_minutes,
            });

            assert!(
                matches!(
                    authority.create_credential(&User::new("qwerty", "mnbvc")),
                    Err(CredentialError::Signing(_))
                ),
                "expiry_minutes {} should fail to sign",
                expiry_minutes
            );
        }
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims {
            authorized: true,
            user_id: "qwerty".into(),
            exp: Utc::now().timestamp() - 3600,
        };
        let token = forge(&claims, Algorithm::HS256, SECRET);

        assert!(matches!(
            authority().validate_credential(&token),
            Err(CredentialError::ExpiredOrInvalidClaims(_))
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = Claims {
            authorized: true,
            user_id: "qwerty".into(),
            exp: Utc::now().timestamp() + 3600,
        };
        let token = forge(&claims, Algorithm::HS256, "some-other-secret");

        assert!(matches!(
            authority().validate_credential(&token),
            Err(CredentialError::SignatureMismatch(_))
        ));
    }

    #[test]
    fn test_other_algorithm_rejected_even_with_correct_key() {
        let claims = Claims {
            authorized: true,
            user_id: "qwerty".into(),
            exp: Utc::now().timestamp() + 3600,
        };
        let token = forge(&claims, Algorithm::HS512, SECRET);

        assert!(matches!(
            authority().validate_credential(&token),
            Err(CredentialError::SignatureMismatch(_))
        ));
    }

    #[test]
    fn test_unsigned_token_rejected() {
        // {"alg":"none","typ":"JWT"}.{"authorized":true,"user_id":"qwerty","exp":9999999999}.
        let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.\
                     eyJhdXRob3JpemVkIjp0cnVlLCJ1c2VyX2lkIjoicXdlcnR5IiwiZXhwIjo5OTk5OTk5OTk5fQ.";
        assert!(authority().validate_credential(token).is_err());
    }

    #[test]
    fn test_garbage_is_malformed() {
        for token in ["", "not-a-jwt", "a.b", "a.b.c"] {
            assert!(
                matches!(
                    authority().validate_credential(token),
                    Err(CredentialError::Malformed(_))
                ),
                "token {:?} should be malformed",
                token
            );
        }
    }

    #[test]
    fn test_missing_exp_is_malformed() {
        #[derive(Serialize)]
        struct NoExpiry {
            authorized: bool,
            user_id: String,
        }

        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoExpiry {
                authorized: true,
                user_id: "qwerty".into(),
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            authority().validate_credential(&token),
            Err(CredentialError::Malformed(_))
        ));
    }
}
