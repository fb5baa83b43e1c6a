use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::internal::UserError;
use crate::errors::InternalError;
use crate::services::{crypto, RoleService};
use crate::stores::UserStore;
use crate::types::db::{role, user};

/// Admin service that orchestrates user administration
///
/// Composes role resolution with the user store: create and update resolve
/// the submitted role-id strings, attach the surviving roles, and persist
/// user row plus assignments in one transaction. The update flow preserves
/// the stored password.
pub struct AdminService {
    user_store: Arc<UserStore>,
    role_service: RoleService,
}

impl AdminService {
    /// Create AdminService from AppData
    ///
    /// Extracts only the dependencies needed by AdminService from the
    /// centralized AppData.
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_store: app_data.user_store.clone(),
            role_service: RoleService::new(app_data.role_store.clone()),
        }
    }

    /// List all users with their roles, ordered by id
    pub async fn list_users(
        &self,
    ) -> Result<Vec<(user::Model, Vec<role::Model>)>, InternalError> {
        self.user_store.find_all_with_roles().await
    }

    /// Find a user by username
    ///
    /// # Returns
    /// * `Err(UserError::UserNotFound)` when no such user exists
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<(user::Model, Vec<role::Model>), InternalError> {
        self.user_store
            .find_by_username_with_roles(username)
            .await?
            .ok_or_else(|| {
                InternalError::User(UserError::UserNotFound {
                    username: username.to_string(),
                })
            })
    }

    /// Find a user by id
    ///
    /// # Returns
    /// * `Err(UserError::UserIdNotFound)` when no such user exists
    pub async fn find_by_id(
        &self,
        id: i64,
    ) -> Result<(user::Model, Vec<role::Model>), InternalError> {
        self.user_store
            .find_by_id_with_roles(id)
            .await?
            .ok_or(InternalError::User(UserError::UserIdNotFound { user_id: id }))
    }

    /// Create a user with the given roles
    ///
    /// The submitted role-id strings are resolved leniently (§ role
    /// resolution); the password is hashed before it reaches the store.
    pub async fn create_user(
        &self,
        username: String,
        password: String,
        role_ids: &[String],
    ) -> Result<(user::Model, Vec<role::Model>), InternalError> {
        let roles = self.role_service.resolve_role_ids(role_ids).await?;
        let password_hash = crypto::hash_password(&password)?;

        let user = self
            .user_store
            .insert_with_roles(username, password_hash, &roles)
            .await?;

        tracing::info!("User created: {} (id {})", user.username, user.id);

        Ok((user, roles))
    }

    /// Update a user and replace its role set
    ///
    /// Loads the prior record first; the stored password is carried over
    /// unchanged so an edit form without a password field can never wipe it.
    pub async fn update_user(
        &self,
        id: i64,
        username: String,
        role_ids: &[String],
    ) -> Result<(user::Model, Vec<role::Model>), InternalError> {
        let existing = self
            .user_store
            .find_by_id(id)
            .await?
            .ok_or(InternalError::User(UserError::UserIdNotFound { user_id: id }))?;

        let roles = self.role_service.resolve_role_ids(role_ids).await?;

        let updated = self
            .user_store
            .update_with_roles(existing, username, &roles)
            .await?;

        tracing::info!("User updated: {} (id {})", updated.username, updated.id);

        Ok((updated, roles))
    }

    /// Remove a user by id
    ///
    /// # Returns
    /// * `Err(UserError::UserIdNotFound)` when no such user exists
    pub async fn remove_user(&self, id: i64) -> Result<(), InternalError> {
        let existing = self
            .user_store
            .find_by_id(id)
            .await?
            .ok_or(InternalError::User(UserError::UserIdNotFound { user_id: id }))?;

        let username = existing.username.clone();
        self.user_store.delete(existing).await?;

        tracing::info!("User removed: {} (id {})", username, id);

        Ok(())
    }
}

#[cfg(test)]
#[path = "admin_service_tests.rs"]
mod admin_service_tests;
