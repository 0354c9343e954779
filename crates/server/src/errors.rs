use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use service::errors::ServiceError;

use crate::views;

/// Classification of a request failure, used only to pick the status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Invalid,
    Unauthorized,
    NotFound,
    Internal,
}

/// Request-terminal error carrying a kind and a response-facing message.
/// Every handler propagates failures here; rendering happens in one place.
#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
}

impl AppError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Invalid, message: message.into() }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Unauthorized, message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::NotFound, message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Internal, message: message.into() }
    }

    fn status(&self) -> StatusCode {
        match self.kind {
            ErrorKind::Invalid => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => Self::not_found(msg),
            ServiceError::Validation(msg) => Self::invalid(msg),
            ServiceError::Model(e) => Self::invalid(e.to_string()),
            // A malformed cursor is a backend failure from the router's
            // point of view, same as any other storage error.
            ServiceError::BadPageToken(tok) => Self::internal(format!("invalid page token: {tok}")),
            ServiceError::Storage(msg) => Self::internal(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = %status, message = %self.message, "request failed");
        }
        (status, Html(views::error_page(status, &self.message))).into_response()
    }
}
