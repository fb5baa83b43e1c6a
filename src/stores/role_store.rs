use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::internal::RoleError;
use crate::errors::InternalError;
use crate::types::db::role::{self, Entity as Role};

/// RoleStore manages the fixed role set
///
/// Roles are seeded by migration and administered independently of users;
/// user operations only ever read them.
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all roles, ordered by id
    pub async fn find_all(&self) -> Result<Vec<role::Model>, InternalError> {
        Role::find()
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_all_roles", e))
    }

    /// Look up the roles matching the given ids
    ///
    /// Ids that resolve to nothing are simply absent from the result.
    pub async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<role::Model>, InternalError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        Role::find()
            .filter(role::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_roles_by_ids", e))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<role::Model>, InternalError> {
        Role::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_role_by_name", e))
    }

    /// Persist a new role
    pub async fn insert(&self, name: String) -> Result<role::Model, InternalError> {
        let new_role = role::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            name: Set(name.clone()),
        };

        new_role.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                InternalError::Role(RoleError::DuplicateRole { name })
            } else {
                InternalError::database("insert_role", e)
            }
        })
    }
}

impl std::fmt::Debug for RoleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleStore").field("db", &"<connection>").finish()
    }
}
