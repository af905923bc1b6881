//! Repository for the `invoices` table, including the transactional
//! payment path and the admin statistics aggregates.

use hostdesk_core::types::{DbId, Money};
use sqlx::PgPool;

use crate::models::invoice::{
    BillingStatistics, CreateInvoice, Invoice, InvoiceWithService, InvoiceWithUser, PayOutcome,
};
use crate::models::status::ServiceKind;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, service_id, amount, status, kind, description, \
                        due_date, paid_at, created_at, updated_at";

/// Provides invoice lifecycle operations.
pub struct InvoiceRepo;

impl InvoiceRepo {
    /// Insert a new pending invoice, returning the created row.
    ///
    /// Defaults (description, kind, due date) are resolved by the caller;
    /// this method inserts exactly what it is given.
    pub async fn create(
        pool: &PgPool,
        input: &CreateInvoice,
        description: &str,
        kind: ServiceKind,
    ) -> Result<Invoice, sqlx::Error> {
        let query = format!(
            "INSERT INTO invoices (user_id, service_id, amount, description, kind, due_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(input.user_id)
            .bind(input.service_id)
            .bind(input.amount)
            .bind(description)
            .bind(kind)
            .bind(input.due_date)
            .fetch_one(pool)
            .await
    }

    /// Find an invoice by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invoices WHERE id = $1");
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's invoices with service annotations, newest first.
    ///
    /// Joins on the service row even when it has been soft-deleted so
    /// historical invoices keep their display data.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<InvoiceWithService>, sqlx::Error> {
        sqlx::query_as::<_, InvoiceWithService>(
            "SELECT i.id, i.user_id, i.service_id, i.amount, i.status, i.kind,
                    i.description, i.due_date, i.paid_at, i.created_at,
                    s.name AS service_name, s.description AS service_description
             FROM invoices i
             JOIN services s ON s.id = i.service_id
             WHERE i.user_id = $1
             ORDER BY i.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// List all invoices with owner and service annotations, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<InvoiceWithUser>, sqlx::Error> {
        sqlx::query_as::<_, InvoiceWithUser>(
            "SELECT i.id, i.user_id, i.service_id, i.amount, i.status, i.kind,
                    i.description, i.due_date, i.paid_at, i.created_at,
                    u.email AS user_email, u.domain AS user_domain,
                    u.server_ip AS user_server_ip,
                    s.name AS service_name, s.description AS service_description
             FROM invoices i
             JOIN users u ON u.id = i.user_id
             JOIN services s ON s.id = i.service_id
             ORDER BY i.created_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Pay an invoice on behalf of its owner.
    ///
    /// Runs in a single transaction: the invoice row is locked `FOR UPDATE`
    /// (scoped to the owner, so a foreign invoice reads as absent), then the
    /// owner's user row, then the balance debit and the `pending -> paid`
    /// flip are applied together. Two concurrent pays serialize on the
    /// invoice lock; the loser observes a non-pending status. The balance
    /// never goes negative because the debit only happens after the check
    /// under the same lock.
    pub async fn pay(
        pool: &PgPool,
        invoice_id: DbId,
        user_id: DbId,
    ) -> Result<PayOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM invoices WHERE id = $1 AND user_id = $2 FOR UPDATE"
        );
        let Some(invoice) = sqlx::query_as::<_, Invoice>(&query)
            .bind(invoice_id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(PayOutcome::NotFound);
        };

        if invoice.status != crate::models::status::InvoiceStatus::Pending {
            return Ok(PayOutcome::NotPending);
        }

        let balance: Money =
            sqlx::query_scalar("SELECT balance FROM users WHERE id = $1 FOR UPDATE")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;

        if balance < invoice.amount {
            return Ok(PayOutcome::InsufficientFunds);
        }

        let new_balance: Money = sqlx::query_scalar(
            "UPDATE users SET balance = balance - $2, updated_at = now()
             WHERE id = $1
             RETURNING balance",
        )
        .bind(user_id)
        .bind(invoice.amount)
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE invoices SET status = 'paid', paid_at = now(), updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let invoice = sqlx::query_as::<_, Invoice>(&query)
            .bind(invoice_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(PayOutcome::Paid {
            invoice,
            new_balance,
        })
    }

    /// Cancel a pending invoice.
    ///
    /// The guarded UPDATE only matches `pending` rows, so both terminal
    /// states (and concurrent pays) fall through to `None`. The caller
    /// distinguishes "absent" from "wrong state" via [`Self::find_by_id`].
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "UPDATE invoices SET status = 'cancelled', updated_at = now()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Aggregate counters and revenue sums for the admin dashboard.
    ///
    /// Revenue sums treat "no paid invoices" as 0. Monthly revenue covers
    /// invoices whose `paid_at` falls in the current calendar month.
    pub async fn statistics(pool: &PgPool) -> Result<BillingStatistics, sqlx::Error> {
        let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        let total_services: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM services WHERE is_active")
                .fetch_one(pool)
                .await?;

        let (total_invoices, pending_invoices, paid_invoices): (i64, i64, i64) =
            sqlx::query_as(
                "SELECT COUNT(*),
                        COUNT(*) FILTER (WHERE status = 'pending'),
                        COUNT(*) FILTER (WHERE status = 'paid')
                 FROM invoices",
            )
            .fetch_one(pool)
            .await?;

        let total_revenue: Money = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0) FROM invoices WHERE status = 'paid'",
        )
        .fetch_one(pool)
        .await?;

        let monthly_revenue: Money = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0) FROM invoices
             WHERE status = 'paid' AND paid_at >= date_trunc('month', now())",
        )
        .fetch_one(pool)
        .await?;

        Ok(BillingStatistics {
            total_users,
            total_services,
            total_invoices,
            pending_invoices,
            paid_invoices,
            total_revenue,
            monthly_revenue,
        })
    }
}
