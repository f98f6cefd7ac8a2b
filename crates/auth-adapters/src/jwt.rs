//! Signed-JWT implementation of the `TokenService` port.
//! Tokens carry the user id as `sub` plus an expiry; anything that fails
//! to decode, verify, or parse resolves to Unauthorized.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domains::ports::TokenService;
use domains::{AppError, Result};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtTokenService {
    pub fn new(secret: &SecretString, ttl_secs: i64) -> Self {
        let key = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(key),
            decoding: DecodingKey::from_secret(key),
            ttl: Duration::seconds(ttl_secs),
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: Uuid) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("token signing failed: {e}")))
    }

    fn resolve(&self, token: &str) -> Result<Uuid> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| AppError::Unauthorized("invalid token".into()))?;
        data.claims
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized("invalid token subject".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str, ttl_secs: i64) -> JwtTokenService {
        JwtTokenService::new(&SecretString::from(secret.to_string()), ttl_secs)
    }

    #[test]
    fn issue_then_resolve_round_trips() {
        let svc = service("test-secret", 3600);
        let id = Uuid::new_v4();
        let token = svc.issue(id).unwrap();
        assert_eq!(svc.resolve(&token).unwrap(), id);
    }

    #[test]
    fn token_signed_with_another_key_is_rejected() {
        let token = service("secret-a", 3600).issue(Uuid::new_v4()).unwrap();
        let err = service("secret-b", 3600).resolve(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Expired well past jsonwebtoken's default leeway.
        let svc = service("test-secret", -120);
        let token = svc.issue(Uuid::new_v4()).unwrap();
        let err = svc.resolve(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let err = service("test-secret", 3600).resolve("nope").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
