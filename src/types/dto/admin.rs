use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::{role, user};

/// A role as exposed through the API
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RoleResponse {
    pub id: i64,

    /// Role name, e.g. "ROLE_USER"
    pub name: String,
}

impl From<role::Model> for RoleResponse {
    fn from(role: role::Model) -> Self {
        Self {
            id: role.id,
            name: role.name,
        }
    }
}

/// A user together with its assigned roles
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,

    pub username: String,

    /// Roles currently assigned to the user
    pub roles: Vec<RoleResponse>,

    /// Creation time (Unix timestamp)
    pub created_at: i64,

    /// Last modification time (Unix timestamp)
    pub updated_at: i64,
}

impl From<(user::Model, Vec<role::Model>)> for UserResponse {
    fn from((user, roles): (user::Model, Vec<role::Model>)) -> Self {
        Self {
            id: user.id,
            username: user.username,
            roles: roles.into_iter().map(RoleResponse::from).collect(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Response model for the user list endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
}

/// Response model for the role list endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RoleListResponse {
    pub roles: Vec<RoleResponse>,
}

/// Request model for creating a user from the admin area
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,

    /// Plaintext password; hashed before persistence
    pub password: String,

    /// Role ids as submitted by the form (decimal strings)
    pub roles: Option<Vec<String>>,
}

/// Request model for editing a user from the admin area
///
/// Carries no password field: the update operation never changes the
/// password, it is preserved from the stored record.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub username: String,

    /// Replacement role ids (decimal strings)
    pub roles: Option<Vec<String>>,
}

/// Response model for user removal
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    /// Success message
    pub message: String,
}
