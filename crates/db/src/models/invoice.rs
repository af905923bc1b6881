//! Invoice entity model, annotated listing rows, and billing statistics.

use hostdesk_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::{InvoiceStatus, ServiceKind};

/// Full invoice row from the `invoices` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Invoice {
    pub id: DbId,
    pub user_id: DbId,
    pub service_id: DbId,
    pub amount: Money,
    pub status: InvoiceStatus,
    pub kind: ServiceKind,
    pub description: String,
    pub due_date: Option<Timestamp>,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Invoice annotated with its service, as shown in the customer cabinet.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InvoiceWithService {
    pub id: DbId,
    pub user_id: DbId,
    pub service_id: DbId,
    pub amount: Money,
    pub status: InvoiceStatus,
    pub kind: ServiceKind,
    pub description: String,
    pub due_date: Option<Timestamp>,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub service_name: String,
    pub service_description: String,
}

/// Invoice annotated with owner and service, as shown in the back office.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InvoiceWithUser {
    pub id: DbId,
    pub user_id: DbId,
    pub service_id: DbId,
    pub amount: Money,
    pub status: InvoiceStatus,
    pub kind: ServiceKind,
    pub description: String,
    pub due_date: Option<Timestamp>,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub user_email: String,
    pub user_domain: Option<String>,
    pub user_server_ip: Option<String>,
    pub service_name: String,
    pub service_description: String,
}

/// DTO for creating a new invoice.
#[derive(Debug, Deserialize)]
pub struct CreateInvoice {
    pub user_id: DbId,
    pub service_id: DbId,
    pub amount: Money,
    pub description: Option<String>,
    pub kind: Option<ServiceKind>,
    pub due_date: Option<Timestamp>,
}

/// Outcome of [`InvoiceRepo::pay`](crate::repositories::InvoiceRepo::pay).
///
/// Returned instead of a domain error so the repository stays on
/// `sqlx::Error`; the handler maps each variant to the error taxonomy.
#[derive(Debug)]
pub enum PayOutcome {
    /// Balance debited and invoice flipped to `paid` in one transaction.
    Paid {
        invoice: Invoice,
        new_balance: Money,
    },
    /// No invoice with this id belongs to the calling user.
    NotFound,
    /// The invoice is already `paid` or `cancelled`.
    NotPending,
    /// The owner's balance does not cover the invoice amount.
    InsufficientFunds,
}

/// Aggregate counters for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct BillingStatistics {
    pub total_users: i64,
    pub total_services: i64,
    pub total_invoices: i64,
    pub pending_invoices: i64,
    pub paid_invoices: i64,
    pub total_revenue: Money,
    pub monthly_revenue: Money,
}
