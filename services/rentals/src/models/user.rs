//! User model and related functionality

use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

/// User entity
///
/// A user without a password hash is anonymous: it may rent, but only with
/// an explicit card.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub guid: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// URI of the customer profile held by the payments provider
    pub customer_uri: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// New user creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password_hash: Option<String>,
    pub customer_uri: String,
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub guid: Uuid,
    pub email: String,
    pub registered: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            registered: user.has_password(),
            guid: user.guid,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Error, Debug)]
#[error("Failed to hash password: {0}")]
pub struct PasswordError(String);

/// Hash a plain text password with Argon2 and a random salt
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError(e.to_string()))?;
    Ok(hash.to_string())
}
