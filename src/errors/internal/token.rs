use thiserror::Error;

/// Failures from JWT issue and validation
///
/// Classified from jsonwebtoken error kinds so the API layer can answer
/// 401 with the right code without string-matching.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Token is invalid")]
    Invalid,

    #[error("Failed to issue token: {message}")]
    Issue { message: String },
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        }
    }
}
