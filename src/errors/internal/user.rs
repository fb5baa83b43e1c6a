use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("User already exists: {username}")]
    DuplicateUsername { username: String },

    #[error("User not found: {username}")]
    UserNotFound { username: String },

    #[error("User id not found: {user_id}")]
    UserIdNotFound { user_id: i64 },
}
