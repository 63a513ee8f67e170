use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::{ApiResponse, Notice};
use crate::services::{AccountError, DirectoryError};

#[derive(Debug)]
pub enum ApiError {
    /// Hard 404 for direct primary-key lookups.
    NotFound(String),

    /// Not-found in an admin delete-by-id flow; surfaced as a warning
    /// notice rather than an error page.
    MissingRecord(String),

    /// The directory has no cafes to pick from.
    EmptyDirectory(String),

    /// Duplicate name or email.
    Conflict(String),

    ValidationError(String),

    Unauthorized(String),

    /// Authenticated but not an admin.
    Forbidden(String),

    DatabaseError(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::MissingRecord(msg) => write!(f, "Missing record: {}", msg),
            ApiError::EmptyDirectory(msg) => write!(f, "Empty directory: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, notice) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::MissingRecord(msg) => {
                let notice = Notice::warning(msg.clone());
                (StatusCode::NOT_FOUND, msg, Some(notice))
            }
            ApiError::EmptyDirectory(msg) => {
                let notice = Notice::info(msg.clone());
                (StatusCode::NOT_FOUND, msg, Some(notice))
            }
            ApiError::Conflict(msg) => {
                let notice = Notice::warning(msg.clone());
                (StatusCode::CONFLICT, msg, Some(notice))
            }
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Unauthorized(msg) => {
                let notice = Notice::danger(msg.clone());
                (StatusCode::UNAUTHORIZED, msg, Some(notice))
            }
            ApiError::Forbidden(msg) => {
                let notice = Notice::warning(msg.clone());
                (StatusCode::FORBIDDEN, msg, Some(notice))
            }
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                    None,
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = match notice {
            Some(notice) => ApiResponse::<()>::rejection(message, notice),
            None => ApiResponse::<()>::error(message),
        };

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::DuplicateEmail => {
                ApiError::Conflict("You've already signed up with that email, log in instead!".to_string())
            }
            AccountError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid email or password. Please try again.".to_string())
            }
            AccountError::NotFound(id) => ApiError::NotFound(format!("User {} not found", id)),
            AccountError::Validation(msg) => ApiError::ValidationError(msg),
            AccountError::Database(msg) => ApiError::DatabaseError(msg),
            AccountError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::EmptyDirectory => {
                ApiError::EmptyDirectory("No cafés available.".to_string())
            }
            DirectoryError::DuplicateName(name) => {
                ApiError::Conflict(format!("Cafe name '{}' exists.", name))
            }
            DirectoryError::NotFound(id) => ApiError::NotFound(format!("Cafe {} not found", id)),
            DirectoryError::Database(msg) => ApiError::DatabaseError(msg),
            DirectoryError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::InternalError(msg.into())
    }

    pub fn cafe_not_found(id: i32) -> Self {
        ApiError::NotFound(format!("Cafe {} not found", id))
    }
}
