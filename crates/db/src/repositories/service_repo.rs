//! Repository for the `services` table.

use hostdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::service::{CreateService, Service, UpdateService};
use crate::models::status::ServiceKind;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, price, description, kind, is_active, created_at, updated_at";

/// Provides CRUD + soft-delete operations for the service catalog.
pub struct ServiceRepo;

impl ServiceRepo {
    /// Insert a new active service, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateService) -> Result<Service, sqlx::Error> {
        let query = format!(
            "INSERT INTO services (name, price, description, kind)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.description.as_deref().unwrap_or(""))
            .bind(input.kind.unwrap_or(ServiceKind::OneTime))
            .fetch_one(pool)
            .await
    }

    /// List active services ordered by name ascending.
    ///
    /// Soft-deleted rows are excluded from the catalog.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE is_active ORDER BY name ASC");
        sqlx::query_as::<_, Service>(&query).fetch_all(pool).await
    }

    /// Find a service by ID regardless of its active flag.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a service that is still active.
    pub async fn find_active_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1 AND is_active");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a service. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateService,
    ) -> Result<Option<Service>, sqlx::Error> {
        let query = format!(
            "UPDATE services SET
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                description = COALESCE($4, description),
                kind = COALESCE($5, kind),
                is_active = COALESCE($6, is_active),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.description)
            .bind(input.kind)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a service by setting `is_active = false`.
    ///
    /// Returns `true` if a row was updated. The row is retained so
    /// historical invoices keep a valid reference.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE services SET is_active = false, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
