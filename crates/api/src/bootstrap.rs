//! First-run provisioning.
//!
//! A fresh database has no admin account, so every admin endpoint would be
//! unreachable. `seed_admin` creates (or promotes) the account named by the
//! `ADMIN_EMAIL` / `ADMIN_PASSWORD` environment variables at startup.

use hostdesk_core::roles::ROLE_ADMIN;
use hostdesk_db::models::user::{CreateUser, User};
use hostdesk_db::repositories::UserRepo;
use sqlx::PgPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Ensure an admin account exists for the given credentials.
///
/// If no user has this email, one is created with the admin role. If the
/// user exists with a different role, it is promoted; the stored password
/// is left untouched. Repeated calls are no-ops.
pub async fn seed_admin(pool: &PgPool, email: &str, password: &str) -> AppResult<User> {
    if let Some(existing) = UserRepo::find_by_email(pool, email).await? {
        if existing.role == ROLE_ADMIN {
            return Ok(existing);
        }
        let promoted = UserRepo::set_role(pool, existing.id, ROLE_ADMIN)
            .await?
            .ok_or_else(|| {
                AppError::InternalError(format!("User {} vanished during promotion", existing.id))
            })?;
        tracing::info!(email, "Promoted existing account to admin");
        return Ok(promoted);
    }

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Failed to hash admin password: {e}")))?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;
    tracing::info!(email, "Created bootstrap admin account");
    Ok(user)
}
