/*
 * Responsibility
 * - Application-wide AppError (the only failure type handlers/middleware return)
 * - IntoResponse: uniform envelope {success: false, error: <status>, message}
 * - Fallbacks for unknown routes (404) and unsupported verbs (405)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Unauthorized { message: String },
    #[error("permissions not included in token")]
    PermissionsMissing,
    #[error("permission not found: {permission}")]
    Forbidden { permission: &'static str },
    #[error("bad request: {message}")]
    BadRequest { message: String },
    #[error("{resource} not found")]
    NotFound { resource: &'static str },
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("request timed out")]
    RequestTimeout,
    #[error("request body too large")]
    PayloadTooLarge,
    #[error("{message}")]
    Unprocessable { message: String },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::Unprocessable {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::PermissionsMissing => StatusCode::BAD_REQUEST,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = ErrorResponse {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = ?e, "store operation failed");
        match e {
            RepoError::Db(_) => AppError::Internal,
        }
    }
}

/// Router fallback: no route matches the path.
pub async fn route_not_found() -> AppError {
    AppError::not_found("resource")
}

/// Router fallback: the path exists but not for this method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_taxonomy() {
        assert_eq!(AppError::unauthorized("x").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::PermissionsMissing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Forbidden {
                permission: "delete:movies"
            }
            .status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::not_found("actor").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            AppError::unprocessable("x").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::RequestTimeout.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            AppError::PayloadTooLarge.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn messages_are_client_readable() {
        assert_eq!(AppError::not_found("movie").to_string(), "movie not found");
        assert_eq!(
            AppError::Forbidden {
                permission: "post:actors"
            }
            .to_string(),
            "permission not found: post:actors"
        );
        assert_eq!(
            AppError::bad_request("body is not valid JSON").to_string(),
            "bad request: body is not valid JSON"
        );
    }
}
