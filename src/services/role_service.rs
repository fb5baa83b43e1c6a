use std::collections::BTreeSet;
use std::sync::Arc;

use crate::errors::InternalError;
use crate::stores::RoleStore;
use crate::types::db::role;

/// Role lookup and resolution of submitted role-id strings
pub struct RoleService {
    role_store: Arc<RoleStore>,
}

impl RoleService {
    pub fn new(role_store: Arc<RoleStore>) -> Self {
        Self { role_store }
    }

    /// The full role set, ordered by id
    pub async fn all_roles(&self) -> Result<Vec<role::Model>, InternalError> {
        self.role_store.find_all().await
    }

    /// Resolve submitted role-id strings to role entities
    ///
    /// Lenient by design: ids that fail to parse or resolve to nothing are
    /// dropped, never an error, and duplicates collapse. Callers rely on
    /// RoleValidator to have already rejected empty submissions.
    pub async fn resolve_role_ids(
        &self,
        submitted: &[String],
    ) -> Result<Vec<role::Model>, InternalError> {
        let mut ids: BTreeSet<i64> = BTreeSet::new();
        for raw in submitted {
            match raw.trim().parse::<i64>() {
                Ok(id) => {
                    ids.insert(id);
                }
                Err(_) => {
                    tracing::debug!("Dropping unparseable role id: {:?}", raw);
                }
            }
        }

        let ids: Vec<i64> = ids.into_iter().collect();
        let roles = self.role_store.find_by_ids(&ids).await?;

        if roles.len() < ids.len() {
            tracing::debug!(
                "Dropped {} role ids that resolved to nothing",
                ids.len() - roles.len()
            );
        }

        Ok(roles)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<role::Model>, InternalError> {
        self.role_store.find_by_name(name).await
    }

    /// Add a role to the role set
    pub async fn save_role(&self, name: String) -> Result<role::Model, InternalError> {
        let role = self.role_store.insert(name).await?;
        tracing::info!("Role created: {} (id {})", role.name, role.id);
        Ok(role)
    }
}
