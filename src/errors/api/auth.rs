use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

use crate::errors::internal::{InternalError, TokenError, UserError};
use crate::types::dto::common::ValidationErrorResponse;
use crate::types::internal::validation::FieldError;

/// Standardized error response for authentication endpoints
#[derive(Object, Debug)]
pub struct AuthErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Authentication error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Submission rejected by a validator
    #[oai(status = 400)]
    ValidationFailed(Json<ValidationErrorResponse>),

    /// Invalid username or password
    #[oai(status = 401)]
    InvalidCredentials(Json<AuthErrorResponse>),

    /// Invalid or malformed JWT
    #[oai(status = 401)]
    InvalidToken(Json<AuthErrorResponse>),

    /// JWT has expired
    #[oai(status = 401)]
    ExpiredToken(Json<AuthErrorResponse>),

    /// Account behind a valid token no longer exists
    #[oai(status = 404)]
    UserNotFound(Json<AuthErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<AuthErrorResponse>),
}

impl AuthError {
    /// Create a ValidationFailed error from validator output
    pub fn validation_failed(errors: Vec<FieldError>) -> Self {
        AuthError::ValidationFailed(Json(ValidationErrorResponse::new(errors)))
    }

    /// Create an InvalidCredentials error
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(AuthErrorResponse {
            error: "invalid_credentials".to_string(),
            message: "Invalid username or password".to_string(),
            status_code: 401,
        }))
    }

    /// Create an InvalidToken error
    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(Json(AuthErrorResponse {
            error: "invalid_token".to_string(),
            message: "Invalid or malformed JWT".to_string(),
            status_code: 401,
        }))
    }

    /// Create an ExpiredToken error
    pub fn expired_token() -> Self {
        AuthError::ExpiredToken(Json(AuthErrorResponse {
            error: "expired_token".to_string(),
            message: "JWT has expired".to_string(),
            status_code: 401,
        }))
    }

    /// Create a UserNotFound error
    pub fn user_not_found() -> Self {
        AuthError::UserNotFound(Json(AuthErrorResponse {
            error: "user_not_found".to_string(),
            message: "User no longer exists".to_string(),
            status_code: 404,
        }))
    }

    /// Convert TokenError to AuthError
    pub fn from_token_error(err: TokenError) -> Self {
        match err {
            TokenError::Expired => Self::expired_token(),
            TokenError::Invalid => Self::invalid_token(),
            TokenError::Issue { .. } => {
                tracing::error!("Token issue failure: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Convert InternalError to AuthError
    ///
    /// Infrastructure details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::User(UserError::DuplicateUsername { username }) => {
                // Race backstop: the validator passed but the unique
                // constraint fired on insert.
                tracing::warn!("Duplicate username past validation: {}", username);
                Self::validation_failed(vec![FieldError::new(
                    "username",
                    "A user with that name already exists",
                )])
            }
            _ => {
                tracing::error!("Unexpected error in auth operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Create a generic internal server error
    fn internal_server_error() -> Self {
        AuthError::InternalError(Json(AuthErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AuthError::ValidationFailed(json) => json
                .0
                .errors
                .iter()
                .map(|e| e.message.clone())
                .collect::<Vec<_>>()
                .join("; "),
            AuthError::InvalidCredentials(json) => json.0.message.clone(),
            AuthError::InvalidToken(json) => json.0.message.clone(),
            AuthError::ExpiredToken(json) => json.0.message.clone(),
            AuthError::UserNotFound(json) => json.0.message.clone(),
            AuthError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
