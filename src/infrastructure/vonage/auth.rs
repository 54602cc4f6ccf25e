/// Application JWT signing for the Voice API
use crate::domain::shared::{DomainError, Result};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifetime of a minted token, in seconds
const TOKEN_TTL_SECS: i64 = 15 * 60;

/// Claims carried by an application token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationClaims {
    pub application_id: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Signs short-lived RS256 tokens with the application private key
#[derive(Clone)]
pub struct JwtSigner {
    application_id: String,
    key: EncodingKey,
}

impl JwtSigner {
    pub fn new(application_id: impl Into<String>, private_key_pem: &str) -> Result<Self> {
        let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes()).map_err(|e| {
            DomainError::InvalidConfiguration(format!("application private key is unusable: {}", e))
        })?;

        Ok(Self {
            application_id: application_id.into(),
            key,
        })
    }

    /// Mint a fresh token
    pub fn token(&self) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = ApplicationClaims {
            application_id: self.application_id.clone(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.key)
            .map_err(|e| DomainError::Provider(format!("failed to sign application token: {}", e)))
    }
}

impl fmt::Debug for JwtSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSigner")
            .field("application_id", &self.application_id)
            .finish_non_exhaustive()
    }
}
