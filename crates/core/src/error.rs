use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Every business-rule failure in the repositories and handlers maps to one
/// of these variants; the API crate translates them into HTTP statuses.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The operation is not legal for the entity's current state,
    /// e.g. paying an invoice that is already paid or cancelled.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The caller's balance does not cover the requested amount.
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
