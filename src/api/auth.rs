use std::sync::Arc;

use poem_openapi::{auth::Bearer, payload::Json, OpenApi, SecurityScheme, Tags};

use crate::app_data::AppData;
use crate::errors::api::auth::AuthError;
use crate::services::{crypto, RegistrationService, TokenService, UserValidator};
use crate::stores::UserStore;
use crate::types::dto::admin::UserResponse;
use crate::types::dto::auth::{LoginRequest, RegisterRequest, RegisteredResponse, TokenResponse};

/// Authentication API endpoints
pub struct AuthApi {
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
    registration_service: RegistrationService,
    user_validator: UserValidator,
}

impl AuthApi {
    /// Create a new AuthApi from AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_store: app_data.user_store.clone(),
            token_service: app_data.token_service.clone(),
            registration_service: RegistrationService::new(app_data.clone()),
            user_validator: UserValidator::new(app_data.user_store.clone()),
        }
    }
}

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Login with username and password to receive an authentication token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    pub async fn login(&self, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, AuthError> {
        let (user, roles) = self
            .user_store
            .find_by_username_with_roles(&body.username)
            .await
            .map_err(AuthError::from_internal_error)?
            .ok_or_else(AuthError::invalid_credentials)?;

        let password_ok = crypto::verify_password(&body.password, &user.password_hash)
            .map_err(AuthError::from_internal_error)?;
        if !password_ok {
            return Err(AuthError::invalid_credentials());
        }

        let access_token = self
            .token_service
            .issue(&user, &roles)
            .map_err(AuthError::from_token_error)?;

        Ok(Json(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_service.expires_in_seconds(),
        }))
    }

    /// Register a new account
    ///
    /// The username is checked for uniqueness; the default role is always
    /// granted, no role selection exists at this boundary.
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    pub async fn register(
        &self,
        body: Json<RegisterRequest>,
    ) -> Result<Json<RegisteredResponse>, AuthError> {
        let errors = self
            .user_validator
            .validate(&body.username, None)
            .await
            .map_err(AuthError::from_internal_error)?;
        if !errors.is_empty() {
            return Err(AuthError::validation_failed(errors));
        }

        let (user, role) = self
            .registration_service
            .register_user(body.username.clone(), body.password.clone())
            .await
            .map_err(AuthError::from_internal_error)?;

        Ok(Json(RegisteredResponse {
            id: user.id,
            username: user.username,
            role: role.name,
        }))
    }

    /// Return the authenticated user's record with roles
    ///
    /// Identity comes from the presented token, not from any ambient
    /// security context.
    #[oai(path = "/profile", method = "get", tag = "AuthTags::Authentication")]
    pub async fn profile(&self, auth: BearerAuth) -> Result<Json<UserResponse>, AuthError> {
        let claims = self
            .token_service
            .validate(&auth.0.token)
            .map_err(AuthError::from_token_error)?;

        let user_id = claims.user_id().ok_or_else(AuthError::invalid_token)?;

        let (user, roles) = self
            .user_store
            .find_by_id_with_roles(user_id)
            .await
            .map_err(AuthError::from_internal_error)?
            .ok_or_else(AuthError::user_not_found)?;

        Ok(Json(UserResponse::from((user, roles))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_api() -> (Arc<AppData>, AuthApi) {
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
        let api = AuthApi::new(app_data.clone());
        (app_data, api)
    }

    async fn register_bob(api: &AuthApi) -> RegisteredResponse {
        api.register(Json(RegisterRequest {
            username: "bob".to_string(),
            password: "x".to_string(),
        }))
        .await
        .expect("Failed to register")
        .0
    }

    #[tokio::test]
    async fn test_register_grants_exactly_the_default_role() {
        let (app_data, api) = setup_api().await;

        let registered = register_bob(&api).await;

        assert_eq!(registered.username, "bob");
        assert_eq!(registered.role, "ROLE_USER");

        let (_, roles) = app_data
            .user_store
            .find_by_id_with_roles(registered.id)
            .await
            .expect("Failed to load user")
            .expect("User not found");
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].name, "ROLE_USER");
    }

    #[tokio::test]
    async fn test_register_duplicate_username_is_rejected() {
        let (_app_data, api) = setup_api().await;
        register_bob(&api).await;

        let result = api
            .register(Json(RegisterRequest {
                username: "bob".to_string(),
                password: "other".to_string(),
            }))
            .await;

        match result {
            Err(AuthError::ValidationFailed(json)) => {
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
    async fn test_login_with_valid_credentials() {
        let (_app_data, api) = setup_api().await;
        register_bob(&api).await;

        let result = api
            .login(Json(LoginRequest {
                username: "bob".to_string(),
                password: "x".to_string(),
            }))
            .await;

        assert!(result.is_ok());
        let response = result.unwrap();
        assert!(!response.access_token.is_empty());
        assert_eq!(response.token_type, "Bearer");
        assert!(response.expires_in > 0);
    }

    #[tokio::test]
    async fn test_login_token_carries_roles() {
        let (app_data, api) = setup_api().await;
        register_bob(&api).await;

        let response = api
            .login(Json(LoginRequest {
                username: "bob".to_string(),
                password: "x".to_string(),
            }))
            .await
            .expect("Failed to login");

        let claims = app_data
            .token_service
            .validate(&response.access_token)
            .expect("Failed to validate issued token");

        assert_eq!(claims.username, "bob");
        assert_eq!(claims.roles, vec!["ROLE_USER"]);
        assert!(!claims.is_admin());
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let (_app_data, api) = setup_api().await;
        register_bob(&api).await;

        let result = api
            .login(Json(LoginRequest {
                username: "bob".to_string(),
                password: "wrong".to_string(),
            }))
            .await;

        match result {
            Err(AuthError::InvalidCredentials(_)) => {}
            _ => panic!("Expected InvalidCredentials error"),
        }
    }

    #[tokio::test]
    async fn test_login_with_unknown_user() {
        let (_app_data, api) = setup_api().await;

        let result = api
            .login(Json(LoginRequest {
                username: "nobody".to_string(),
                password: "x".to_string(),
            }))
            .await;

        match result {
            Err(AuthError::InvalidCredentials(_)) => {}
            _ => panic!("Expected InvalidCredentials error"),
        }
    }

    #[tokio::test]
    async fn test_profile_returns_authenticated_user() {
        let (_app_data, api) = setup_api().await;
        let registered = register_bob(&api).await;

        let token = api
            .login(Json(LoginRequest {
                username: "bob".to_string(),
                password: "x".to_string(),
            }))
            .await
            .expect("Failed to login")
            .access_token
            .clone();

        let profile = api
            .profile(BearerAuth(Bearer { token }))
            .await
            .expect("Failed to fetch profile");

        assert_eq!(profile.id, registered.id);
        assert_eq!(profile.username, "bob");
        assert_eq!(profile.roles.len(), 1);
        assert_eq!(profile.roles[0].name, "ROLE_USER");
    }

    #[tokio::test]
    async fn test_profile_with_invalid_token() {
        let (_app_data, api) = setup_api().await;

        let result = api
            .profile(BearerAuth(Bearer {
                token: "not-a-jwt".to_string(),
            }))
            .await;

        match result {
            Err(AuthError::InvalidToken(_)) => {}
            _ => panic!("Expected InvalidToken error"),
        }
    }
}
