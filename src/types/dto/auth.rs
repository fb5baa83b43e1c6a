use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username for authentication
    pub username: String,

    /// Password for authentication
    pub password: String,
}

/// Response model containing the authentication token
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Number of seconds until the access token expires
    pub expires_in: i64,
}

/// Request model for self-service registration
///
/// Registration accepts no role list; the default role is always granted.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,

    /// Plaintext password; hashed before persistence
    pub password: String,
}

/// Response model for a completed registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisteredResponse {
    pub id: i64,

    pub username: String,

    /// The role granted on registration
    pub role: String,
}
