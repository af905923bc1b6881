//! Service catalog entity model and DTOs.

use hostdesk_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::ServiceKind;

/// Full service row from the `services` table.
///
/// Soft-deleted rows keep `is_active = false` and stay referenceable by
/// historical invoices.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Service {
    pub id: DbId,
    pub name: String,
    pub price: Money,
    pub description: String,
    pub kind: ServiceKind,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new service.
#[derive(Debug, Deserialize)]
pub struct CreateService {
    pub name: String,
    pub price: Money,
    pub description: Option<String>,
    pub kind: Option<ServiceKind>,
}

/// DTO for updating a service. Only non-`None` fields are applied.
#[derive(Debug, Deserialize)]
pub struct UpdateService {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub description: Option<String>,
    pub kind: Option<ServiceKind>,
    pub is_active: Option<bool>,
}
