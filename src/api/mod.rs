// API layer - HTTP endpoints
pub mod admin;
pub mod auth;
pub mod health;

pub use admin::AdminApi;
pub use auth::{AuthApi, BearerAuth};
pub use health::HealthApi;
