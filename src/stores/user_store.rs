use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::errors::internal::{DatabaseError, UserError};
use crate::errors::InternalError;
use crate::types::db::user::{self, Entity as User};
use crate::types::db::{role, user_role};

/// UserStore manages user records and their role assignments
///
/// Every mutation commits the user row and its `users_roles` rows in one
/// transaction.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all users with their roles, ordered by id
    pub async fn find_all_with_roles(
        &self,
    ) -> Result<Vec<(user::Model, Vec<role::Model>)>, InternalError> {
        User::find()
            .find_with_related(role::Entity)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_all_with_roles", e))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_by_id", e))
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_by_username", e))
    }

    /// Load one user together with its roles
    pub async fn find_by_id_with_roles(
        &self,
        id: i64,
    ) -> Result<Option<(user::Model, Vec<role::Model>)>, InternalError> {
        let user = self.find_by_id(id).await?;
        match user {
            Some(user) => {
                let roles = self.roles_of(&user).await?;
                Ok(Some((user, roles)))
            }
            None => Ok(None),
        }
    }

    pub async fn find_by_username_with_roles(
        &self,
        username: &str,
    ) -> Result<Option<(user::Model, Vec<role::Model>)>, InternalError> {
        let user = self.find_by_username(username).await?;
        match user {
            Some(user) => {
                let roles = self.roles_of(&user).await?;
                Ok(Some((user, roles)))
            }
            None => Ok(None),
        }
    }

    /// Insert a new user and its role assignments in one transaction
    ///
    /// # Returns
    /// * `Ok(user::Model)` - The persisted user with its generated id
    /// * `Err(InternalError)` - DuplicateUsername when the unique constraint
    ///   fires, or a database error
    pub async fn insert_with_roles(
        &self,
        username: String,
        password_hash: String,
        roles: &[role::Model],
    ) -> Result<user::Model, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|source| DatabaseError::TransactionBegin { source })?;

        let now = Utc::now().timestamp();

        let new_user = user::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            username: Set(username.clone()),
            password_hash: Set(password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let user = new_user
            .insert(&txn)
            .await
            .map_err(|e| Self::classify_write_error("insert_user", &username, e))?;

        Self::insert_assignments(&txn, user.id, roles).await?;

        txn.commit()
            .await
            .map_err(|source| DatabaseError::TransactionCommit { source })?;

        Ok(user)
    }

    /// Overwrite an existing user and replace its role assignments
    ///
    /// The stored password hash is left untouched: the edit flow never
    /// carries a password and must not wipe the one on record.
    pub async fn update_with_roles(
        &self,
        existing: user::Model,
        username: String,
        roles: &[role::Model],
    ) -> Result<user::Model, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|source| DatabaseError::TransactionBegin { source })?;

        let user_id = existing.id;
        let mut active: user::ActiveModel = existing.into();
        active.username = Set(username.clone());
        active.updated_at = Set(Utc::now().timestamp());

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| Self::classify_write_error("update_user", &username, e))?;

        user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("clear_role_assignments", e))?;

        Self::insert_assignments(&txn, user_id, roles).await?;

        txn.commit()
            .await
            .map_err(|source| DatabaseError::TransactionCommit { source })?;

        Ok(updated)
    }

    /// Delete a user and its role assignments in one transaction
    ///
    /// Roles themselves are never touched.
    pub async fn delete(&self, user: user::Model) -> Result<(), InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|source| DatabaseError::TransactionBegin { source })?;

        user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(user.id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("clear_role_assignments", e))?;

        user.delete(&txn)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;

        txn.commit()
            .await
            .map_err(|source| DatabaseError::TransactionCommit { source })?;

        Ok(())
    }

    async fn roles_of(&self, user: &user::Model) -> Result<Vec<role::Model>, InternalError> {
        user.find_related(role::Entity)
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("roles_of_user", e))
    }

    async fn insert_assignments(
        txn: &sea_orm::DatabaseTransaction,
        user_id: i64,
        roles: &[role::Model],
    ) -> Result<(), InternalError> {
        if roles.is_empty() {
            return Ok(());
        }

        let assignments = roles.iter().map(|role| user_role::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role.id),
        });

        // exec_without_returning: the join table has a composite key, there
        // is no last-insert id to unpack.
        user_role::Entity::insert_many(assignments)
            .exec_without_returning(txn)
            .await
            .map_err(|e| InternalError::database("insert_role_assignments", e))?;

        Ok(())
    }

    fn classify_write_error(operation: &str, username: &str, e: sea_orm::DbErr) -> InternalError {
        if e.to_string().contains("UNIQUE") {
            InternalError::User(UserError::DuplicateUsername {
                username: username.to_string(),
            })
        } else {
            InternalError::database(operation, e)
        }
    }
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore").field("db", &"<connection>").finish()
    }
}
