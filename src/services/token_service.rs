use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use crate::errors::internal::TokenError;
use crate::types::db::{role, user};
use crate::types::internal::auth::Claims;

/// Manages JWT generation and validation
///
/// Claims carry the user id, username and role names so handlers can make
/// authorization decisions from the presented token alone, without a
/// security-context global.
pub struct TokenService {
    jwt_secret: String,
    jwt_expiration_minutes: i64,
}

impl TokenService {
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            jwt_expiration_minutes: 60,
        }
    }

    /// Issue a JWT for the given user and its roles
    pub fn issue(&self, user: &user::Model, roles: &[role::Model]) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let expiration = now + (self.jwt_expiration_minutes * 60);

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            roles: roles.iter().map(|role| role.name.clone()).collect(),
            exp: expiration,
            iat: now,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| TokenError::Issue {
            message: e.to_string(),
        })
    }

    /// Validate a JWT and return its claims
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )?;

        Ok(token_data.claims)
    }

    /// Lifetime of issued tokens, in seconds
    pub fn expires_in_seconds(&self) -> i64 {
        self.jwt_expiration_minutes * 60
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiration_minutes", &self.jwt_expiration_minutes)
            .finish()
    }
}
