//! Bearer-credential extractor. Handlers that take an [`Identity`] only run
//! after the token resolved to a user id; everything else gets 401.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::AppState;
use domains::AppError;

/// The authenticated caller's user id.
#[derive(Debug, Clone, Copy)]
pub struct Identity(pub Uuid);

impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ApiError(AppError::Unauthorized("access denied, no token provided".into()))
            })?;
        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError(AppError::Unauthorized("malformed authorization header".into()))
        })?;
        let user_id = state.accounts.resolve_token(token)?;
        Ok(Identity(user_id))
    }
}
