//! Handlers for the service catalog (admin CRUD + authenticated listing).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hostdesk_core::error::CoreError;
use hostdesk_core::types::DbId;
use hostdesk_db::models::service::{CreateService, Service, UpdateService};
use hostdesk_db::repositories::ServiceRepo;
use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/billing/services
///
/// List active services for the customer cabinet. Soft-deleted services
/// never appear here.
pub async fn list_services(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<Service>>>> {
    let services = ServiceRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: services }))
}

/// POST /api/billing/services
///
/// Create a catalog service. Admin only. Name must be non-empty and price
/// strictly positive.
pub async fn create_service(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateService>,
) -> AppResult<(StatusCode, Json<DataResponse<Service>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Service name must not be empty".into(),
        )));
    }
    if input.price <= Decimal::ZERO {
        return Err(AppError::Core(CoreError::Validation(
            "Service price must be positive".into(),
        )));
    }

    let service = ServiceRepo::create(&state.pool, &input).await?;

    tracing::info!(service_id = service.id, name = %service.name, "service created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: service })))
}

/// PUT /api/billing/services/{id}
///
/// Update a service. Admin only. Omitted fields are left untouched; a
/// supplied price must still be positive.
pub async fn update_service(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateService>,
) -> AppResult<Json<DataResponse<Service>>> {
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Service name must not be empty".into(),
            )));
        }
    }
    if let Some(price) = input.price {
        if price <= Decimal::ZERO {
            return Err(AppError::Core(CoreError::Validation(
                "Service price must be positive".into(),
            )));
        }
    }

    let service = ServiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound {
            entity: "service",
            id,
        }))?;

    Ok(Json(DataResponse { data: service }))
}

/// DELETE /api/billing/services/{id}
///
/// Soft-delete a service. Admin only. The row is retained so existing
/// invoices keep their reference; it just disappears from the catalog.
pub async fn delete_service(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ServiceRepo::soft_delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "service",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
