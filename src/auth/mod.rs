mod token;

pub use token::TokenVerifier;
#[cfg(test)]
pub use token::Claims;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};

use std::sync::Arc;

use crate::error::ApiError;

/// Identity of the caller, taken from a verified bearer token.
///
/// Handlers that take this extractor never run for unauthenticated requests:
/// a missing token is rejected with 401, an invalid or expired one with 403.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl<S> FromRequestParts<S> for AuthUser
where
    Arc<TokenVerifier>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            tracing::debug!("rejecting {} {}: no bearer token", parts.method, parts.uri);
            return Err(ApiError::Unauthorized);
        };

        let verifier = Arc::<TokenVerifier>::from_ref(state);
        match verifier.verify(token) {
            Ok(claims) => Ok(Self { id: claims.id }),
            Err(e) => {
                tracing::debug!("rejecting {} {}: {}", parts.method, parts.uri, e);
                Err(ApiError::Forbidden)
            }
        }
    }
}
