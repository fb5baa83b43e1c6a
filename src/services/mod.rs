// Services layer - Business logic and orchestration
pub mod admin_service;
pub mod crypto;
pub mod registration_service;
pub mod role_service;
pub mod role_validator;
pub mod token_service;
pub mod user_validator;

pub use admin_service::AdminService;
pub use registration_service::RegistrationService;
pub use role_service::RoleService;
pub use role_validator::RoleValidator;
pub use token_service::TokenService;
pub use user_validator::UserValidator;
