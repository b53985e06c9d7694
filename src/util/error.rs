use axum::{extract::rejection::JsonRejection, http::StatusCode, response::{IntoResponse, Response}};
use tracing::error;

use crate::repository::repository_error::RepositoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerErrorKind {
    NotFound,
    Unauthorized,
    Conflict,
    BadRequest,
    Internal,
}

impl HandlerErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            HandlerErrorKind::NotFound => StatusCode::NOT_FOUND,
            HandlerErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            // Clients of the registration endpoint expect 400 for a taken email.
            HandlerErrorKind::Conflict | HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::NotFound => "NotFound",
            HandlerErrorKind::Unauthorized => "Unauthorized",
            HandlerErrorKind::Conflict => "Conflict",
            HandlerErrorKind::BadRequest => "BadRequest",
            HandlerErrorKind::Internal => "Internal",
        };
        write!(f, "{}", s)
    }
}

/// Error leaving a handler. Rendered as a bare status with a plain-text body.
#[derive(Debug, thiserror::Error)]
#[error("{error}: {message}")]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
}

impl HandlerError {
    pub fn new<T: Into<String>>(error: HandlerErrorKind, message: T) -> Self {
        HandlerError { error, message: message.into() }
    }

    pub fn bad_request<T: Into<String>>(message: T) -> Self {
        Self::new(HandlerErrorKind::BadRequest, message)
    }

    pub fn not_found<T: Into<String>>(message: T) -> Self {
        Self::new(HandlerErrorKind::NotFound, message)
    }
}

/// Unreadable JSON bodies answer a plain-text 400 like every other client error.
impl From<JsonRejection> for HandlerError {
    fn from(rejection: JsonRejection) -> Self {
        HandlerError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        (self.error.status(), self.message).into_response()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Invalid Input: {0}")]
    InvalidInput(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => ServiceError::NotFound(msg),
            RepositoryError::ValidationError(msg) => ServiceError::InvalidInput(msg),
            RepositoryError::AlreadyExists(msg) => ServiceError::Conflict(msg),
            RepositoryError::DatabaseError(msg)
            | RepositoryError::ConnectionError(msg)
            | RepositoryError::SerializationError(msg) => ServiceError::InternalError(msg),
        }
    }
}

impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => HandlerError::new(HandlerErrorKind::NotFound, msg),
            ServiceError::InvalidInput(msg) => HandlerError::new(HandlerErrorKind::BadRequest, msg),
            ServiceError::Unauthorized(msg) => HandlerError::new(HandlerErrorKind::Unauthorized, msg),
            ServiceError::Conflict(msg) => HandlerError::new(HandlerErrorKind::Conflict, msg),
            ServiceError::InternalError(msg) => {
                error!("Request failed: {}", msg);
                HandlerError::new(HandlerErrorKind::Internal, "Internal Server Error")
            }
        }
    }
}
