//! Application error types and their HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::auth::TokenError;
use crate::db::{ConflictKind, StoreError};

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Email already in use")]
    EmailTaken,

    #[error("Username already in use")]
    UsernameTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code returned alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION",
            AppError::EmailTaken => "EMAIL_TAKEN",
            AppError::UsernameTaken => "USERNAME_TAKEN",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::Unauthenticated(_) => "UNAUTHENTICATED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Config(_) | AppError::Db(_) | AppError::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::EmailTaken | AppError::UsernameTaken => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::Unauthenticated(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Db(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(ConflictKind::Email) => AppError::EmailTaken,
            StoreError::Conflict(ConflictKind::Username) => AppError::UsernameTaken,
            StoreError::NotFound => AppError::NotFound("Account not found".to_string()),
            StoreError::Corrupt(msg) => AppError::Internal(anyhow::anyhow!("corrupt record: {}", msg)),
            StoreError::Db(e) => AppError::Db(e),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        AppError::Unauthenticated(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Unreadable or incomplete request bodies are input errors like any other.
impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Config(_) | AppError::Db(_) | AppError::Internal(_) => {
                error!(error = %self, "request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({ "error": message, "code": self.code() }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
