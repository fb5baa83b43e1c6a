use std::sync::Arc;

use crate::errors::InternalError;
use crate::stores::UserStore;
use crate::types::internal::validation::FieldError;

/// Rejects a user submission whose username collides with a different
/// existing user.
///
/// The record being edited is excluded by id: callers pass the editing
/// user's id through `editing_id` so resubmitting an unchanged record never
/// spuriously fails.
pub struct UserValidator {
    user_store: Arc<UserStore>,
}

impl UserValidator {
    pub fn new(user_store: Arc<UserStore>) -> Self {
        Self { user_store }
    }

    /// Validate a candidate username
    ///
    /// # Arguments
    /// * `username` - The submitted username
    /// * `editing_id` - Id of the record being edited, or None for a new user
    ///
    /// # Returns
    /// Zero or one field errors attached to the `username` field
    pub async fn validate(
        &self,
        username: &str,
        editing_id: Option<i64>,
    ) -> Result<Vec<FieldError>, InternalError> {
        let mut errors = Vec::new();

        if let Some(existing) = self.user_store.find_by_username(username).await? {
            if editing_id != Some(existing.id) {
                errors.push(FieldError::new(
                    "username",
                    "A user with that name already exists",
                ));
            }
        }

        Ok(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::db::role;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{DatabaseConnection, EntityTrait};

    async fn setup() -> (DatabaseConnection, Arc<UserStore>, UserValidator) {
        let db = sea_orm::Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let user_store = Arc::new(UserStore::new(db.clone()));
        let validator = UserValidator::new(user_store.clone());
        (db, user_store, validator)
    }

    async fn insert_user(db: &DatabaseConnection, store: &UserStore, username: &str) -> i64 {
        let roles = role::Entity::find()
            .all(db)
            .await
            .expect("Failed to load roles");

        store
            .insert_with_roles(username.to_string(), "hash".to_string(), &roles[..1])
            .await
            .expect("Failed to insert user")
            .id
    }

    #[tokio::test]
    async fn test_collision_with_existing_user_yields_one_error() {
        let (db, store, validator) = setup().await;
        insert_user(&db, &store, "alice").await;

        let errors = validator
            .validate("alice", None)
            .await
            .expect("Validation must not fail");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "username");
        assert_eq!(errors[0].message, "A user with that name already exists");
    }

    #[tokio::test]
    async fn test_editing_own_record_is_not_a_collision() {
        let (db, store, validator) = setup().await;
        let id = insert_user(&db, &store, "alice").await;

        let errors = validator
            .validate("alice", Some(id))
            .await
            .expect("Validation must not fail");

        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn test_editing_into_another_users_name_is_a_collision() {
        let (db, store, validator) = setup().await;
        insert_user(&db, &store, "alice").await;
        let bob_id = insert_user(&db, &store, "bob").await;

        let errors = validator
            .validate("alice", Some(bob_id))
            .await
            .expect("Validation must not fail");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "username");
    }

    #[tokio::test]
    async fn test_unused_username_passes() {
        let (_db, _store, validator) = setup().await;

        let errors = validator
            .validate("carol", None)
            .await
            .expect("Validation must not fail");

        assert!(errors.is_empty());
    }
}
