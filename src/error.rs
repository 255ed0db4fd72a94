/*
 * Responsibility
 * - ApiError shared by middleware and handlers
 * - IntoResponse (HTTP status / JSON error body)
 * - convert store / payment / token errors into one taxonomy
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::payment::PaymentError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenKind {
    // Token failed signature/expiry/format checks.
    InvalidCredential,
    // Token was fine but the requester lacks the required role or scope.
    AuthorizationDenied,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden(ForbiddenKind),
    #[error("{service} failure")]
    Upstream { service: &'static str },
    #[error("{service} not configured")]
    Unavailable { service: &'static str },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_credential() -> Self {
        Self::Forbidden(ForbiddenKind::InvalidCredential)
    }

    pub fn denied() -> Self {
        Self::Forbidden(ForbiddenKind::AuthorizationDenied)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "UnAuthorized access".into(),
            ),
            AppError::Forbidden(ForbiddenKind::InvalidCredential) => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Forbidden access".into(),
            ),
            AppError::Forbidden(ForbiddenKind::AuthorizationDenied) => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", "forbidden".into())
            }
            AppError::Upstream { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPSTREAM_FAILURE",
                "upstream failure".into(),
            ),
            AppError::Unavailable { service } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                format!("{service} not configured"),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = %e, "document store call failed");
        AppError::Upstream {
            service: "document store",
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(e: PaymentError) -> Self {
        tracing::error!(error = %e, "payment provider call failed");
        AppError::Upstream {
            service: "payment provider",
        }
    }
}
