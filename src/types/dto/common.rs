use poem_openapi::Object;

use crate::types::internal::validation::FieldError;

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// A single field-scoped validation message
#[derive(Object, Debug)]
pub struct FieldErrorObject {
    /// Name of the form field the error is attached to
    pub field: String,

    /// Human-readable error message
    pub message: String,
}

impl From<FieldError> for FieldErrorObject {
    fn from(err: FieldError) -> Self {
        Self {
            field: err.field,
            message: err.message,
        }
    }
}

/// Response body for rejected submissions
#[derive(Object, Debug)]
pub struct ValidationErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Per-field validation messages
    pub errors: Vec<FieldErrorObject>,

    /// HTTP status code
    pub status_code: u16,
}

impl ValidationErrorResponse {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self {
            error: "validation_failed".to_string(),
            errors: errors.into_iter().map(FieldErrorObject::from).collect(),
            status_code: 400,
        }
    }
}
