use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use aiventory_core::StaffId;

/// JWT claims model.
///
/// `iat`/`exp` are serialized as unix timestamps so any standards-compliant
/// JWT library (including the one used for signing here) can validate them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject / staff identifier.
    pub sub: StaffId,

    /// Display name of the staff member (shown on movement entries).
    pub name: String,

    /// Coarse role label ("admin" / "staff").
    pub role: String,

    /// Issued-at timestamp.
    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate JWT claims.
///
/// Note: this validates the *claims* only. Signature verification is done
/// by [`crate::Hs256TokenCodec`].
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> JwtClaims {
        JwtClaims {
            sub: StaffId::new(),
            name: "Alice".to_string(),
            role: "staff".to_string(),
            issued_at,
            expires_at,
        }
    }

    #[test]
    fn valid_window_passes() {
        let now = Utc::now();
        let c = claims(now - Duration::minutes(1), now + Duration::minutes(10));
        assert!(validate_claims(&c, now).is_ok());
    }

    #[test]
    fn expired_token_rejected() {
        let now = Utc::now();
        let c = claims(now - Duration::minutes(20), now - Duration::minutes(10));
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::Expired));
    }

    #[test]
    fn future_token_rejected() {
        let now = Utc::now();
        let c = claims(now + Duration::minutes(5), now + Duration::minutes(15));
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::NotYetValid));
    }

    #[test]
    fn inverted_window_rejected() {
        let now = Utc::now();
        let c = claims(now, now);
        assert_eq!(
            validate_claims(&c, now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }
}
