//! Bearer-token session context.
//!
//! A [`SessionContext`] is created at login by decoding the backend-issued
//! JWT and is dropped at logout. Components that need the current user's
//! identity or role receive the context explicitly; there is no ambient
//! global session state.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Role carried by the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular employee; can request leave and view holidays.
    Employee,
    /// Reporting manager; additionally approves team requests.
    Manager,
    /// HR; additionally manages holiday calendars.
    Hr,
    /// Administrator; full access including user management.
    Admin,
}

/// Claims embedded in the backend's access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username (token subject).
    pub sub: String,
    /// Numeric user id.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// Role of the user.
    pub role: Role,
    /// Expiry, seconds since the epoch.
    pub exp: usize,
}

/// The current user's identity, decoded from a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// Numeric user id.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// Username.
    pub username: String,
    /// Role of the user.
    pub role: Role,
}

impl SessionContext {
    /// Decodes and validates a bearer token into a session context.
    ///
    /// Validation uses HMAC-SHA256 and rejects expired tokens.
    ///
    /// # Arguments
    ///
    /// * `token` - The raw JWT from the login response
    /// * `secret` - The shared HMAC secret
    pub fn from_token(token: &str, secret: &str) -> EngineResult<Self> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|e| EngineError::InvalidToken {
            message: e.to_string(),
        })?;

        Ok(SessionContext {
            user_id: claims.user_id,
            name: claims.name,
            username: claims.sub,
            role: claims.role,
        })
    }

    /// Returns true when this session may edit holiday calendars.
    pub fn can_manage_holidays(&self) -> bool {
        matches!(self.role, Role::Hr | Role::Admin)
    }

    /// Returns true when this session may act on team requests.
    pub fn can_approve_leave(&self) -> bool {
        matches!(self.role, Role::Manager | Role::Hr | Role::Admin)
    }
}
