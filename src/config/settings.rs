use std::env;

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://roleboard.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("JWT_SECRET environment variable must be set")]
    MissingJwtSecret,

    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),
}

/// Application settings loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub jwt_secret: String,
}

impl AppSettings {
    /// Load settings from environment variables
    ///
    /// `DATABASE_URL`, `HOST` and `PORT` fall back to defaults; `JWT_SECRET`
    /// is required.
    pub fn from_env() -> Result<Self, SettingsError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let server_host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let server_port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| SettingsError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| SettingsError::MissingJwtSecret)?;

        Ok(Self {
            database_url,
            server_host,
            server_port,
            jwt_secret,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
