//! Portfolio entry model and DTOs.

use hostdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full portfolio row from the `portfolio_items` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PortfolioItem {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
    /// Stored image filename under the static directory.
    pub image: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a portfolio entry.
#[derive(Debug)]
pub struct CreatePortfolioItem {
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub image: Option<String>,
}
