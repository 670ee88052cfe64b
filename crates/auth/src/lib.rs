//! `aiventory-auth` — authentication boundary.
//!
//! Staff identity, bcrypt password hashing, and HS256 bearer tokens.
//! Intentionally decoupled from HTTP and storage.

pub mod claims;
pub mod password;
pub mod staff;
pub mod token;

pub use claims::{validate_claims, JwtClaims, TokenValidationError};
pub use password::{hash_password, verify_password};
pub use staff::{NewStaff, Staff};
pub use token::{AuthError, Hs256TokenCodec};
