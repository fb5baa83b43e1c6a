use serde::{Deserialize, Serialize};

/// Role granted automatically on self-service registration.
pub const ROLE_USER: &str = "ROLE_USER";

/// Role required for the admin area.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id, decimal string)
    pub sub: String,

    /// Username at the time of issue
    pub username: String,

    /// Role names held by the user at the time of issue
    pub roles: Vec<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Parse the subject back into a user id. A token whose subject is not
    /// a decimal id was not issued by this service.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }

    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == ROLE_ADMIN)
    }
}
