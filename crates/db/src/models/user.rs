//! User entity model and DTOs.

use hostdesk_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub domain: Option<String>,
    pub server_ip: Option<String>,
    pub balance: Money,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub role: String,
    pub domain: Option<String>,
    pub server_ip: Option<String>,
    pub balance: Money,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            role: user.role,
            domain: user.domain,
            server_ip: user.server_ip,
            balance: user.balance,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// DTO for updating profile fields. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub domain: Option<String>,
    pub server_ip: Option<String>,
}
