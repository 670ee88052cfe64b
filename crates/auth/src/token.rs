use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::claims::{validate_claims, JwtClaims, TokenValidationError};

/// Authentication error.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid credentials")]
    InvalidCredentials,
}

/// HS256 token issue/verify over [`JwtClaims`].
pub struct Hs256TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Hs256TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Sign claims into a compact token.
    pub fn issue(&self, claims: &JwtClaims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    /// Verify signature and claim window against `now`.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, AuthError> {
        // The claim window is checked explicitly below; disable the
        // library's wall-clock exp check so `now` stays injectable.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.decoding, &validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}
