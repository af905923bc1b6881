//! Repository for the `portfolio_items` table.

use hostdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::portfolio::{CreatePortfolioItem, PortfolioItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, link, image, created_at";

/// Provides CRUD operations for public portfolio entries.
pub struct PortfolioRepo;

impl PortfolioRepo {
    /// Insert a new portfolio entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePortfolioItem,
    ) -> Result<PortfolioItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO portfolio_items (title, description, link, image)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PortfolioItem>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.link)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    /// List all portfolio entries, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<PortfolioItem>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM portfolio_items ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, PortfolioItem>(&query)
            .fetch_all(pool)
            .await
    }

    /// Delete a portfolio entry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM portfolio_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
