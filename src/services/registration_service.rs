use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::internal::RoleError;
use crate::errors::InternalError;
use crate::services::crypto;
use crate::stores::{RoleStore, UserStore};
use crate::types::db::{role, user};
use crate::types::internal::auth::ROLE_USER;

/// Self-service registration
///
/// Registration takes no role list: every registered user is granted
/// exactly the default role, whatever the submitted form may have carried.
pub struct RegistrationService {
    user_store: Arc<UserStore>,
    role_store: Arc<RoleStore>,
}

impl RegistrationService {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_store: app_data.user_store.clone(),
            role_store: app_data.role_store.clone(),
        }
    }

    /// Register a new user with the default role
    ///
    /// # Returns
    /// * `Ok((user, role))` - The persisted user and the granted role
    /// * `Err(InternalError)` - DuplicateUsername, a missing default role
    ///   seed, or a database error
    pub async fn register_user(
        &self,
        username: String,
        password: String,
    ) -> Result<(user::Model, role::Model), InternalError> {
        let default_role = self
            .role_store
            .find_by_name(ROLE_USER)
            .await?
            .ok_or_else(|| {
                InternalError::Role(RoleError::DefaultRoleMissing {
                    name: ROLE_USER.to_string(),
                })
            })?;

        let password_hash = crypto::hash_password(&password)?;

        let user = self
            .user_store
            .insert_with_roles(username, password_hash, std::slice::from_ref(&default_role))
            .await?;

        tracing::info!("User registered: {} (id {})", user.username, user.id);

        Ok((user, default_role))
    }
}
