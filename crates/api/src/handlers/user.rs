//! Handlers for profile management, balance top-up, and the admin user list.

use axum::extract::State;
use axum::Json;
use hostdesk_core::error::CoreError;
use hostdesk_core::types::Money;
use hostdesk_db::models::user::{UpdateProfile, UserResponse};
use hostdesk_db::repositories::UserRepo;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /user/balance/top-up`.
#[derive(Debug, Deserialize)]
pub struct TopUpRequest {
    pub amount: Money,
}

/// GET /api/user/profile
///
/// Return the authenticated user's own profile.
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound {
            entity: "user",
            id: auth_user.user_id,
        }))?;

    Ok(Json(DataResponse { data: user.into() }))
}

/// PUT /api/user/profile
///
/// Update the authenticated user's domain and/or server IP. Omitted fields
/// are left untouched.
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::update_profile(&state.pool, auth_user.user_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound {
            entity: "user",
            id: auth_user.user_id,
        }))?;

    Ok(Json(DataResponse { data: user.into() }))
}

/// POST /api/user/balance/top-up
///
/// Credit the authenticated user's balance. The amount must be strictly
/// positive.
pub async fn top_up_balance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<TopUpRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if input.amount <= Decimal::ZERO {
        return Err(AppError::Core(CoreError::Validation(
            "Top-up amount must be positive".into(),
        )));
    }

    let user = UserRepo::top_up(&state.pool, auth_user.user_id, input.amount)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound {
            entity: "user",
            id: auth_user.user_id,
        }))?;

    tracing::info!(user_id = user.id, amount = %input.amount, "balance topped up");

    Ok(Json(DataResponse { data: user.into() }))
}

/// GET /api/user/users
///
/// List all registered users for the back office. Admin only.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse { data: users }))
}
