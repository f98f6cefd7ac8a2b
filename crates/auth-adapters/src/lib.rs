//! # auth-adapters
//!
//! Credential-side implementations: Argon2 password hashing and, behind the
//! `auth-jwt` feature, a signed-JWT implementation of the token port.

pub mod password;
pub use password::Argon2PasswordHasher;

#[cfg(feature = "auth-jwt")]
pub mod jwt;
#[cfg(feature = "auth-jwt")]
pub use jwt::JwtTokenService;
