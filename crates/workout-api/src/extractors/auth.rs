//! Authentication extractor
//!
//! Resolves the caller from the bearer token in the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use workout_core::UserId;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller extracted from an access token
///
/// Role checks happen in the service layer; this only proves identity.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: UserId,
}

impl AuthUser {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|e| {
                    if parts.headers.contains_key(axum::http::header::AUTHORIZATION) {
                        tracing::debug!(error = %e, "Malformed authorization header");
                        ApiError::InvalidAuthFormat
                    } else {
                        ApiError::MissingAuth
                    }
                })?;

        let app_state = AppState::from_ref(state);

        // Expired and forged tokens keep their own error codes
        let claims = app_state
            .jwt_service()
            .validate_access_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected access token");
                ApiError::App(e)
            })?;

        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!(error = %e, subject = %claims.sub, "Invalid subject in token");
            ApiError::App(e)
        })?;

        Ok(AuthUser::new(user_id))
    }
}
