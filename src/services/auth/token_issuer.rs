use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::config::TokenSecret;

#[derive(Debug, Error)]
pub enum TokenIssueError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("failed to sign token: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize)]
struct AccessTokenClaims<'a> {
    id: &'a str,
    iat: i64,
    exp: i64,
}

/// Signs access tokens with the shared HMAC secret.
///
/// The real login/signup flow lives outside this service; this is what
/// `token-gen` and the tests use to mint tokens the gate will accept.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl_seconds: u64,
}

impl TokenIssuer {
    pub fn new(secret: &TokenSecret, ttl_seconds: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    /// Issue a token for `id`, valid from now for the configured TTL.
    pub fn issue(&self, id: &str) -> Result<String, TokenIssueError> {
        self.issue_at(id, chrono::Utc::now().timestamp())
    }

    /// Issue a token as if it had been signed at `iat` (unix seconds).
    pub fn issue_at(&self, id: &str, iat: i64) -> Result<String, TokenIssueError> {
        if id.is_empty() {
            return Err(TokenIssueError::EmptyId);
        }

        let claims = AccessTokenClaims {
            id,
            iat,
            exp: iat + self.ttl_seconds as i64,
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            TokenIssueError::Sign(e)
        })
    }
}
