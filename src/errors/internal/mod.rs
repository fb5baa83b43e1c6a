use thiserror::Error;

pub mod database;
pub mod role;
pub mod token;
pub mod user;

pub use database::DatabaseError;
pub use role::RoleError;
pub use token::TokenError;
pub use user::UserError;

/// Internal error type for store and service operations
///
/// Infrastructure errors (database, crypto) are shared; domain errors are
/// per-aggregate. Not exposed via API - endpoints must convert to AuthError
/// or AdminError.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Role(#[from] RoleError),

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto { operation: String, message: String },
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn crypto(operation: &str, message: impl Into<String>) -> InternalError {
        InternalError::Crypto {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}
