use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::dto::ErrorResponse;

/// Errors rendered to API callers as `{ error, message }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Title and content are required")]
    MissingFields,

    #[error("{0}")]
    InvalidBody(String),

    #[error("Authorization header with a Bearer token is required")]
    Unauthorized,

    #[error("Token is invalid or expired")]
    Forbidden,

    /// Carries a fixed message; store details never leave the server.
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn category(&self) -> &'static str {
        match self {
            Self::MissingFields => "Missing required fields",
            Self::InvalidBody(_) => "Invalid request body",
            Self::Unauthorized => "Access token required",
            Self::Forbidden => "Invalid token",
            Self::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.category().to_string(),
            message: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}
