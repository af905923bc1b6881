//! Handlers for the invoice lifecycle: issue, list, pay, cancel, and the
//! admin statistics endpoint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hostdesk_core::error::CoreError;
use hostdesk_core::types::{DbId, Money};
use hostdesk_db::models::invoice::{
    BillingStatistics, CreateInvoice, Invoice, InvoiceWithService, InvoiceWithUser, PayOutcome,
};
use hostdesk_db::models::status::InvoiceStatus;
use hostdesk_db::repositories::{InvoiceRepo, ServiceRepo, UserRepo};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Days until a newly issued invoice falls due when the admin does not
/// supply an explicit due date.
const DEFAULT_DUE_DAYS: i64 = 30;

/// Response for a successful payment: the paid invoice plus the remaining
/// balance so the cabinet can update without a second request.
#[derive(Debug, Serialize)]
pub struct PayResponse {
    pub invoice: Invoice,
    pub balance: Money,
}

/// POST /api/billing/invoices
///
/// Issue a pending invoice to a user. Admin only. The target user must
/// exist and the service must still be active; description, kind, and due
/// date fall back to service-derived defaults when omitted.
pub async fn create_invoice(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateInvoice>,
) -> AppResult<(StatusCode, Json<DataResponse<Invoice>>)> {
    if input.amount <= Decimal::ZERO {
        return Err(AppError::Core(CoreError::Validation(
            "Invoice amount must be positive".into(),
        )));
    }

    let user = UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound {
            entity: "user",
            id: input.user_id,
        }))?;

    let service = ServiceRepo::find_active_by_id(&state.pool, input.service_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound {
            entity: "service",
            id: input.service_id,
        }))?;

    let description = match &input.description {
        Some(d) if !d.trim().is_empty() => d.clone(),
        _ => format!("Service: {}", service.name),
    };
    let kind = input.kind.unwrap_or(service.kind);

    let mut input = input;
    if input.due_date.is_none() {
        input.due_date = Some(chrono::Utc::now() + chrono::Duration::days(DEFAULT_DUE_DAYS));
    }

    let invoice = InvoiceRepo::create(&state.pool, &input, &description, kind).await?;

    tracing::info!(
        invoice_id = invoice.id,
        user_id = user.id,
        amount = %invoice.amount,
        "invoice issued"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: invoice })))
}

/// GET /api/billing/invoices/my
///
/// List the authenticated user's invoices, newest first, annotated with
/// service display data.
pub async fn my_invoices(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<InvoiceWithService>>>> {
    let invoices = InvoiceRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: invoices }))
}

/// GET /api/billing/invoices/all
///
/// List every invoice with owner and service annotations. Admin only.
pub async fn all_invoices(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<InvoiceWithUser>>>> {
    let invoices = InvoiceRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: invoices }))
}

/// POST /api/billing/invoices/{id}/pay
///
/// Pay one of the caller's own pending invoices from their balance. A
/// foreign invoice reads as absent rather than forbidden, so the endpoint
/// does not confirm that other users' invoice ids exist.
pub async fn pay_invoice(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PayResponse>>> {
    let outcome = InvoiceRepo::pay(&state.pool, id, auth_user.user_id).await?;

    match outcome {
        PayOutcome::Paid {
            invoice,
            new_balance,
        } => {
            tracing::info!(
                invoice_id = invoice.id,
                user_id = auth_user.user_id,
                "invoice paid"
            );
            Ok(Json(DataResponse {
                data: PayResponse {
                    invoice,
                    balance: new_balance,
                },
            }))
        }
        PayOutcome::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "invoice",
            id,
        })),
        PayOutcome::NotPending => Err(AppError::Core(CoreError::InvalidState(
            "Invoice is not pending".into(),
        ))),
        PayOutcome::InsufficientFunds => Err(AppError::Core(CoreError::InsufficientFunds(
            "Balance does not cover the invoice amount".into(),
        ))),
    }
}

/// POST /api/billing/invoices/{id}/cancel
///
/// Cancel a pending invoice. Admin only. Paid and already-cancelled
/// invoices are rejected with an invalid-state error.
pub async fn cancel_invoice(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Invoice>>> {
    if let Some(invoice) = InvoiceRepo::cancel(&state.pool, id).await? {
        return Ok(Json(DataResponse { data: invoice }));
    }

    // The guarded update matched nothing: either the invoice is absent or
    // it is already in a terminal state.
    match InvoiceRepo::find_by_id(&state.pool, id).await? {
        Some(invoice) if invoice.status != InvoiceStatus::Pending => Err(AppError::Core(
            CoreError::InvalidState("Invoice is not pending".into()),
        )),
        _ => Err(AppError::Core(CoreError::NotFound {
            entity: "invoice",
            id,
        })),
    }
}

/// GET /api/billing/statistics
///
/// Aggregate counters and revenue sums for the admin dashboard.
pub async fn statistics(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<BillingStatistics>>> {
    let stats = InvoiceRepo::statistics(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}
