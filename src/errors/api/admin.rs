use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

use crate::errors::internal::{InternalError, TokenError, UserError};
use crate::types::dto::common::ValidationErrorResponse;
use crate::types::internal::validation::FieldError;

/// Standardized error response for admin endpoints
#[derive(Object, Debug)]
pub struct AdminErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Admin operation error types
#[derive(ApiResponse, Debug)]
pub enum AdminError {
    /// Submission rejected by a validator
    #[oai(status = 400)]
    ValidationFailed(Json<ValidationErrorResponse>),

    /// Missing, invalid or expired bearer token
    #[oai(status = 401)]
    Unauthorized(Json<AdminErrorResponse>),

    /// Admin role required
    #[oai(status = 403)]
    AdminRequired(Json<AdminErrorResponse>),

    /// User not found
    #[oai(status = 404)]
    UserNotFound(Json<AdminErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<AdminErrorResponse>),
}

impl AdminError {
    /// Create a ValidationFailed error from validator output
    pub fn validation_failed(errors: Vec<FieldError>) -> Self {
        AdminError::ValidationFailed(Json(ValidationErrorResponse::new(errors)))
    }

    /// Create an Unauthorized error
    pub fn unauthorized(error: &str, message: &str) -> Self {
        AdminError::Unauthorized(Json(AdminErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
            status_code: 401,
        }))
    }

    /// Create an AdminRequired error
    pub fn admin_required() -> Self {
        AdminError::AdminRequired(Json(AdminErrorResponse {
            error: "admin_required".to_string(),
            message: "Admin role required".to_string(),
            status_code: 403,
        }))
    }

    /// Create a UserNotFound error
    pub fn user_not_found(message: String) -> Self {
        AdminError::UserNotFound(Json(AdminErrorResponse {
            error: "user_not_found".to_string(),
            message,
            status_code: 404,
        }))
    }

    /// Convert TokenError to AdminError
    pub fn from_token_error(err: TokenError) -> Self {
        match err {
            TokenError::Expired => Self::unauthorized("expired_token", "Token has expired"),
            TokenError::Invalid => Self::unauthorized("invalid_token", "Token is invalid"),
            TokenError::Issue { .. } => {
                tracing::error!("Token issue failure during admin operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Convert InternalError to AdminError
    ///
    /// This is the explicit conversion point from internal errors to API
    /// errors. Infrastructure details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::User(UserError::UserIdNotFound { user_id }) => {
                Self::user_not_found(format!("User not found: {}", user_id))
            }
            InternalError::User(UserError::UserNotFound { username }) => {
                Self::user_not_found(format!("User not found: {}", username))
            }
            InternalError::User(UserError::DuplicateUsername { username }) => {
                // The validator runs first; reaching this means a concurrent
                // insert won the race or an edit collided on the constraint.
                tracing::warn!("Duplicate username past validation: {}", username);
                Self::validation_failed(vec![FieldError::new(
                    "username",
                    "A user with that name already exists",
                )])
            }
            _ => {
                tracing::error!("Unexpected error in admin operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Create a generic internal server error
    ///
    /// Always returns a generic message without exposing internal details.
    fn internal_server_error() -> Self {
        AdminError::InternalError(Json(AdminErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AdminError::ValidationFailed(json) => json
                .0
                .errors
                .iter()
                .map(|e| e.message.clone())
                .collect::<Vec<_>>()
                .join("; "),
            AdminError::Unauthorized(json) => json.0.message.clone(),
            AdminError::AdminRequired(json) => json.0.message.clone(),
            AdminError::UserNotFound(json) => json.0.message.clone(),
            AdminError::InternalError(json) => json.0.message.clone(),
        }
    }

    /// Get the HTTP status code from the error variant
    pub fn status_code(&self) -> u16 {
        match self {
            AdminError::ValidationFailed(json) => json.0.status_code,
            AdminError::Unauthorized(json) => json.0.status_code,
            AdminError::AdminRequired(json) => json.0.status_code,
            AdminError::UserNotFound(json) => json.0.status_code,
            AdminError::InternalError(json) => json.0.status_code,
        }
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
