use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// The two top-level entity kinds the API stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Thought,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => f.write_str("User"),
            EntityKind::Thought => f.write_str("Thought"),
        }
    }
}

/// Top-level error type returned by every store operation and handler.
#[derive(Debug, Error)]
pub enum AppError {
    /// Path parameter is not a well-formed document identifier.
    #[error("invalid identifier format: {value}")]
    InvalidId { value: String },

    /// Validation failed for one or more fields.
    #[error("validation failed")]
    Validation(#[from] ValidationError),

    /// A unique field value already exists on another entity.
    #[error("unique constraint violation: {field} '{value}'")]
    UniqueViolation { field: &'static str, value: String },

    /// Target entity was not found.
    #[error("{entity} not found")]
    NotFound { entity: EntityKind },

    /// Users cannot friend themselves.
    #[error("users cannot friend themselves")]
    SelfFriend,

    /// Underlying Redis command failed.
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Stored document could not be encoded or decoded.
    #[error("{message}")]
    Store { message: String },
}

impl AppError {
    pub fn not_found(entity: EntityKind) -> Self {
        AppError::NotFound { entity }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidId { .. } | AppError::Validation(_) | AppError::UniqueViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::SelfFriend => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Redis(_) | AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message emitted in the JSON error body.
    pub fn message(&self) -> String {
        match self {
            AppError::InvalidId { value } => format!("Invalid identifier format: {value}"),
            AppError::Validation(err) => err
                .issues
                .iter()
                .map(|issue| format!("{}: {}", issue.field, issue.message))
                .collect::<Vec<_>>()
                .join("; "),
            AppError::UniqueViolation { field, value } => format!("{field} '{value}' is already in use"),
            AppError::NotFound { entity } => format!("{entity} not found"),
            AppError::SelfFriend => String::from("Unprocessable Entity: users cannot friend themselves"),
            AppError::Redis(_) | AppError::Store { .. } => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "message": self.message() }))).into_response()
    }
}

/// Collection of validation issues encountered while checking a payload.
#[derive(Debug, Error)]
#[error("validation errors: {issues:?}")]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new<I>(issues: I) -> Self
    where
        I: IntoIterator<Item = ValidationIssue>,
    {
        Self {
            issues: issues.into_iter().collect(),
        }
    }

    /// Convenience helper for constructing a single-field validation error.
    pub fn single(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new([ValidationIssue::new(field, code, message)])
    }
}

/// Detailed validation failure for a single field.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias for payload validation outcomes.
pub type ValidationResult<T> = Result<T, ValidationError>;
