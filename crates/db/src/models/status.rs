//! Status enums mapping to the Postgres enum types created in the
//! migrations. Variant spellings must match the enum labels exactly --
//! these are also the wire strings clients see.

use serde::{Deserialize, Serialize};

/// Billing cadence for a service or invoice (`service_kind`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "service_kind", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ServiceKind {
    OneTime,
    Monthly,
}

/// Invoice lifecycle (`invoice_status`).
///
/// Legal transitions are `pending -> paid` and `pending -> cancelled`;
/// both `paid` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invoice_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Cancelled,
}

/// Chat lifecycle (`chat_status`). `active -> closed`, one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "chat_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChatStatus {
    Active,
    Closed,
}

/// Which side of the support conversation authored a message
/// (`sender_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "sender_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    User,
    Admin,
}
