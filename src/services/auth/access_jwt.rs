use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::TokenSecret;

// Reasons an access token was rejected. Only ever logged; callers see a uniform 400.
#[derive(Debug, Error)]
pub enum AccessJwtError {
    #[error("token secret is not configured")]
    SecretNotConfigured,
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("missing or unusable 'id' claim")]
    InvalidIdentity,
}

/// Identifier of the authenticated user, as carried in the token's `id` claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Accepts a non-empty string or an integer. Anything else is not an identity.
    pub fn from_claim(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => {
                Some(Self(n.to_string()))
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Access token claims as decoded from the payload.
///
/// `exp` / `nbf` are checked by jsonwebtoken itself, so only the identity is kept here.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    #[serde(default)]
    pub id: serde_json::Value,
}

/// Verified token in the shape the rest of the app uses.
#[derive(Debug, Clone)]
pub struct VerifiedAccessToken {
    pub user_id: UserId,
}

/// HMAC access-token verifier.
///
/// - Built once from the process secret; read-only afterwards.
/// - Without a secret every token is rejected.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: Option<DecodingKey>,
    validation: Validation,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService")
            .field("secret_configured", &self.decoding_key.is_some())
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: Option<&TokenSecret>, leeway_seconds: u64) -> Self {
        let decoding_key = secret.map(|s| DecodingKey::from_secret(s.as_bytes()));

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // exp/nbf are enforced when present but not required.
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = leeway_seconds;
        // A token is already expired in the second its `exp` names.
        validation.reject_tokens_expiring_in_less_than = 1;

        Self {
            decoding_key,
            validation,
        }
    }

    pub fn secret_configured(&self) -> bool {
        self.decoding_key.is_some()
    }

    /// Verify signature (+ exp/nbf) and decode the payload.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError> {
        let key = self
            .decoding_key
            .as_ref()
            .ok_or(AccessJwtError::SecretNotConfigured)?;

        let data = jsonwebtoken::decode::<AccessTokenClaims>(token, key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify, then lift the `id` claim into a `UserId`.
    ///
    /// This is the entry-point for the auth middleware.
    pub fn verify_verified(&self, token: &str) -> Result<VerifiedAccessToken, AccessJwtError> {
        let claims = self.verify(token)?;

        let user_id = UserId::from_claim(&claims.id).ok_or(AccessJwtError::InvalidIdentity)?;

        Ok(VerifiedAccessToken { user_id })
    }
}
