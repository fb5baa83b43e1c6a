use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::auth::BearerAuth;
use crate::app_data::AppData;
use crate::errors::api::admin::AdminError;
use crate::services::{AdminService, RoleService, RoleValidator, TokenService, UserValidator};
use crate::types::dto::admin::{
    CreateUserRequest, DeleteUserResponse, RoleListResponse, RoleResponse, UpdateUserRequest,
    UserListResponse, UserResponse,
};
use crate::types::internal::auth::Claims;

/// Admin user management API endpoints
///
/// Every endpoint requires a bearer token carrying the admin role.
pub struct AdminApi {
    admin_service: AdminService,
    role_service: RoleService,
    user_validator: UserValidator,
    role_validator: RoleValidator,
    token_service: Arc<TokenService>,
}

impl AdminApi {
    /// Create a new AdminApi from AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            admin_service: AdminService::new(app_data.clone()),
            role_service: RoleService::new(app_data.role_store.clone()),
            user_validator: UserValidator::new(app_data.user_store.clone()),
            role_validator: RoleValidator,
            token_service: app_data.token_service.clone(),
        }
    }

    /// Validate the presented token and require the admin role
    fn authorize(&self, auth: &BearerAuth) -> Result<Claims, AdminError> {
        let claims = self
            .token_service
            .validate(&auth.0.token)
            .map_err(AdminError::from_token_error)?;

        if !claims.is_admin() {
            return Err(AdminError::admin_required());
        }

        Ok(claims)
    }
}

/// API tags for admin endpoints
#[derive(Tags)]
enum AdminTags {
    /// User administration
    Users,
    /// Role administration
    Roles,
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    /// List all users with their roles
    #[oai(path = "/users", method = "get", tag = "AdminTags::Users")]
    pub async fn list_users(&self, auth: BearerAuth) -> Result<Json<UserListResponse>, AdminError> {
        self.authorize(&auth)?;

        let users = self
            .admin_service
            .list_users()
            .await
            .map_err(AdminError::from_internal_error)?;

        Ok(Json(UserListResponse {
            users: users.into_iter().map(UserResponse::from).collect(),
        }))
    }

    /// Create a user with an explicit role set
    ///
    /// The username validator runs first, then the role validator; the
    /// first one to fail answers 400 with its field errors.
    #[oai(path = "/users", method = "post", tag = "AdminTags::Users")]
    pub async fn create_user(
        &self,
        auth: BearerAuth,
        body: Json<CreateUserRequest>,
    ) -> Result<Json<UserResponse>, AdminError> {
        self.authorize(&auth)?;

        let user_errors = self
            .user_validator
            .validate(&body.username, None)
            .await
            .map_err(AdminError::from_internal_error)?;
        if !user_errors.is_empty() {
            return Err(AdminError::validation_failed(user_errors));
        }

        let role_errors = self.role_validator.validate(body.roles.as_deref());
        if !role_errors.is_empty() {
            return Err(AdminError::validation_failed(role_errors));
        }

        let created = self
            .admin_service
            .create_user(
                body.username.clone(),
                body.password.clone(),
                body.roles.as_deref().unwrap_or(&[]),
            )
            .await
            .map_err(AdminError::from_internal_error)?;

        Ok(Json(UserResponse::from(created)))
    }

    /// Look up one user by id
    #[oai(path = "/users/:id", method = "get", tag = "AdminTags::Users")]
    pub async fn get_user(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
    ) -> Result<Json<UserResponse>, AdminError> {
        self.authorize(&auth)?;

        let found = self
            .admin_service
            .find_by_id(id.0)
            .await
            .map_err(AdminError::from_internal_error)?;

        Ok(Json(UserResponse::from(found)))
    }

    /// Update a user and replace its role set
    ///
    /// Only the role list is validated here, matching the edit flow; the
    /// stored password is preserved.
    #[oai(path = "/users/:id", method = "put", tag = "AdminTags::Users")]
    pub async fn update_user(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
        body: Json<UpdateUserRequest>,
    ) -> Result<Json<UserResponse>, AdminError> {
        self.authorize(&auth)?;

        let role_errors = self.role_validator.validate(body.roles.as_deref());
        if !role_errors.is_empty() {
            return Err(AdminError::validation_failed(role_errors));
        }

        let updated = self
            .admin_service
            .update_user(
                id.0,
                body.username.clone(),
                body.roles.as_deref().unwrap_or(&[]),
            )
            .await
            .map_err(AdminError::from_internal_error)?;

        Ok(Json(UserResponse::from(updated)))
    }

    /// Remove a user by id
    #[oai(path = "/users/:id", method = "delete", tag = "AdminTags::Users")]
    pub async fn remove_user(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
    ) -> Result<Json<DeleteUserResponse>, AdminError> {
        self.authorize(&auth)?;

        self.admin_service
            .remove_user(id.0)
            .await
            .map_err(AdminError::from_internal_error)?;

        Ok(Json(DeleteUserResponse {
            message: "User removed".to_string(),
        }))
    }

    /// List the fixed role set
    #[oai(path = "/roles", method = "get", tag = "AdminTags::Roles")]
    pub async fn list_roles(&self, auth: BearerAuth) -> Result<Json<RoleListResponse>, AdminError> {
        self.authorize(&auth)?;

        let roles = self
            .role_service
            .all_roles()
            .await
            .map_err(AdminError::from_internal_error)?;

        Ok(Json(RoleListResponse {
            roles: roles.into_iter().map(RoleResponse::from).collect(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use poem_openapi::auth::Bearer;
    use sea_orm::Database;

    async fn setup_api() -> (Arc<AppData>, AdminApi) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let app_data = Arc::new(AppData::init(
            db,
            "test-secret-key-minimum-32-characters".to_string(),
        ));
        let api = AdminApi::new(app_data.clone());
        (app_data, api)
    }

    /// Issue a token for a synthetic admin; admin endpoints only inspect
    /// the claims, the subject does not need a matching row.
    fn admin_auth(app_data: &Arc<AppData>) -> BearerAuth {
        let admin = crate::types::db::user::Model {
            id: 1000,
            username: "admin".to_string(),
            password_hash: "hash".to_string(),
            created_at: 0,
            updated_at: 0,
        };
        let roles = vec![crate::types::db::role::Model {
            id: 2,
            name: "ROLE_ADMIN".to_string(),
        }];

        let token = app_data
            .token_service
            .issue(&admin, &roles)
            .expect("Failed to issue admin token");
        BearerAuth(Bearer { token })
    }

    fn user_auth(app_data: &Arc<AppData>) -> BearerAuth {
        let user = crate::types::db::user::Model {
            id: 1001,
            username: "plain".to_string(),
            password_hash: "hash".to_string(),
            created_at: 0,
            updated_at: 0,
        };
        let roles = vec![crate::types::db::role::Model {
            id: 1,
            name: "ROLE_USER".to_string(),
        }];

        let token = app_data
            .token_service
            .issue(&user, &roles)
            .expect("Failed to issue user token");
        BearerAuth(Bearer { token })
    }

    fn create_request(username: &str, roles: Option<Vec<&str>>) -> Json<CreateUserRequest> {
        Json(CreateUserRequest {
            username: username.to_string(),
            password: "password".to_string(),
            roles: roles.map(|r| r.into_iter().map(String::from).collect()),
        })
    }

    #[tokio::test]
    async fn test_create_then_list_shows_user_with_roles() {
        let (app_data, api) = setup_api().await;

        let created = api
            .create_user(admin_auth(&app_data), create_request("alice", Some(vec!["1"])))
            .await
            .expect("Failed to create user");

        assert_eq!(created.username, "alice");
        assert_eq!(created.roles.len(), 1);
        assert_eq!(created.roles[0].name, "ROLE_USER");

        let listed = api
            .list_users(admin_auth(&app_data))
            .await
            .expect("Failed to list users");

        assert_eq!(listed.users.len(), 1);
        assert_eq!(listed.users[0].username, "alice");
        assert_eq!(listed.users[0].roles.len(), 1);
        assert_eq!(listed.users[0].roles[0].name, "ROLE_USER");
    }

    #[tokio::test]
    async fn test_create_duplicate_username_is_rejected_on_username_field() {
        let (app_data, api) = setup_api().await;

        api.create_user(admin_auth(&app_data), create_request("alice", Some(vec!["1"])))
            .await
            .expect("Failed to create user");

        let result = api
            .create_user(admin_auth(&app_data), create_request("alice", Some(vec!["1"])))
            .await;

        match result {
            Err(AdminError::ValidationFailed(json)) => {
                assert_eq!(json.0.errors.len(), 1);
                assert_eq!(json.0.errors[0].field, "username");
                assert_eq!(
                    json.0.errors[0].message,
                    "A user with that name already exists"
                );
            }
            _ => panic!("Expected ValidationFailed error"),
        }
    }

    #[tokio::test]
    async fn test_create_without_roles_is_rejected_on_roles_field() {
        let (app_data, api) = setup_api().await;

        for request in [create_request("alice", None), create_request("alice", Some(vec![]))] {
            let result = api.create_user(admin_auth(&app_data), request).await;

            match result {
                Err(AdminError::ValidationFailed(json)) => {
                    assert_eq!(json.0.errors.len(), 1);
                    assert_eq!(json.0.errors[0].field, "roles");
                }
                _ => panic!("Expected ValidationFailed error"),
            }
        }
    }

    #[tokio::test]
    async fn test_update_replaces_roles_and_keeps_password() {
        let (app_data, api) = setup_api().await;

        let created = api
            .create_user(admin_auth(&app_data), create_request("alice", Some(vec!["1"])))
            .await
            .expect("Failed to create user");

        let updated = api
            .update_user(
                admin_auth(&app_data),
                Path(created.id),
                Json(UpdateUserRequest {
                    username: "alice".to_string(),
                    roles: Some(vec!["2".to_string()]),
                }),
            )
            .await
            .expect("Failed to update user");

        assert_eq!(updated.roles.len(), 1);
        assert_eq!(updated.roles[0].name, "ROLE_ADMIN");

        let stored = app_data
            .user_store
            .find_by_id(created.id)
            .await
            .expect("Failed to load user")
            .expect("User not found");
        assert!(
            crate::services::crypto::verify_password("password", &stored.password_hash)
                .expect("Failed to verify password")
        );
    }

    #[tokio::test]
    async fn test_update_without_roles_is_rejected() {
        let (app_data, api) = setup_api().await;

        let created = api
            .create_user(admin_auth(&app_data), create_request("alice", Some(vec!["1"])))
            .await
            .expect("Failed to create user");

        let result = api
            .update_user(
                admin_auth(&app_data),
                Path(created.id),
                Json(UpdateUserRequest {
                    username: "alice".to_string(),
                    roles: None,
                }),
            )
            .await;

        match result {
            Err(AdminError::ValidationFailed(json)) => {
                assert_eq!(json.0.errors[0].field, "roles");
            }
            _ => panic!("Expected ValidationFailed error"),
        }
    }

    #[tokio::test]
    async fn test_remove_missing_user_answers_404() {
        let (app_data, api) = setup_api().await;

        let result = api.remove_user(admin_auth(&app_data), Path(424242)).await;

        match result {
            Err(AdminError::UserNotFound(json)) => {
                assert_eq!(json.0.status_code, 404);
            }
            _ => panic!("Expected UserNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_get_missing_user_answers_404() {
        let (app_data, api) = setup_api().await;

        let result = api.get_user(admin_auth(&app_data), Path(424242)).await;

        match result {
            Err(AdminError::UserNotFound(_)) => {}
            _ => panic!("Expected UserNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_list_roles_returns_seeded_set() {
        let (app_data, api) = setup_api().await;

        let roles = api
            .list_roles(admin_auth(&app_data))
            .await
            .expect("Failed to list roles");

        let names: Vec<&str> = roles.roles.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["ROLE_USER", "ROLE_ADMIN"]);
    }

    #[tokio::test]
    async fn test_non_admin_token_is_rejected_with_403() {
        let (app_data, api) = setup_api().await;

        let result = api.list_users(user_auth(&app_data)).await;

        match result {
            Err(AdminError::AdminRequired(json)) => {
                assert_eq!(json.0.status_code, 403);
            }
            _ => panic!("Expected AdminRequired error"),
        }
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected_with_401() {
        let (_app_data, api) = setup_api().await;

        let result = api
            .list_users(BearerAuth(Bearer {
                token: "garbage".to_string(),
            }))
            .await;

        match result {
            Err(AdminError::Unauthorized(json)) => {
                assert_eq!(json.0.status_code, 401);
            }
            _ => panic!("Expected Unauthorized error"),
        }
    }
}
