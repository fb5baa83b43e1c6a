use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::services::TokenService;
use crate::stores::{RoleStore, UserStore};

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once in main.rs and shared across the API
/// surfaces. Services extract what they need from here, which keeps their
/// constructor signatures stable.
pub struct AppData {
    pub db: DatabaseConnection,
    pub user_store: Arc<UserStore>,
    pub role_store: Arc<RoleStore>,
    pub token_service: Arc<TokenService>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database connection should be established and migrated before
    /// calling this.
    pub fn init(db: DatabaseConnection, jwt_secret: String) -> Self {
        tracing::debug!("Creating stores...");

        let user_store = Arc::new(UserStore::new(db.clone()));
        let role_store = Arc::new(RoleStore::new(db.clone()));
        let token_service = Arc::new(TokenService::new(jwt_secret));

        tracing::debug!("Stores created");

        Self {
            db,
            user_store,
            role_store,
            token_service,
        }
    }
}
