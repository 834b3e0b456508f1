//! Application error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::domain::{ports::WriteError, DomainError, ValidationErrors};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("malformed request: {0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(DomainError),
    #[error("{0}")]
    NotFound(DomainError),
    #[error("{0}")]
    Conflict(DomainError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            e if e.is_authentication() => Self::Unauthorized(e),
            e @ (DomainError::UserNotFound | DomainError::RecordNotFound) => Self::NotFound(e),
            e @ DomainError::EmailAlreadyRegistered => Self::Conflict(e),
            e @ (DomainError::PasswordHashFailed | DomainError::SessionIdGenerationFailed) => {
                Self::Internal(anyhow::Error::new(e))
            }
            e => Self::Validation(e.into()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        if errors.contains(&DomainError::PasswordHashFailed) {
            return Self::Internal(anyhow::Error::new(DomainError::PasswordHashFailed));
        }
        Self::Validation(errors)
    }
}

impl From<WriteError> for AppError {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::EmailTaken => Self::Conflict(DomainError::EmailAlreadyRegistered),
            WriteError::Io(e) => Self::Internal(e),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    errors: Vec<String>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Messages safe to return to the client.
    pub fn public_messages(&self) -> Vec<String> {
        match self {
            Self::Validation(errors) => errors.messages(),
            Self::BadRequest(message) => vec![message.clone()],
            Self::Unauthorized(DomainError::InvalidCredentials) => {
                vec![DomainError::InvalidCredentials.to_string()]
            }
            Self::Unauthorized(_) => vec!["unauthorized".into()],
            Self::NotFound(e) | Self::Conflict(e) => vec![e.to_string()],
            Self::Internal(_) => vec!["internal server error".into()],
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Internal(e) = &self {
            error!(error = ?e, "internal error");
        }
        let body = ErrorBody {
            errors: self.public_messages(),
        };
        (self.status(), Json(body)).into_response()
    }
}
