//! Support chat entities: chats, messages, and file attachments.

use hostdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::status::{ChatStatus, SenderType};

/// Full chat row from the `chats` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Chat {
    pub id: DbId,
    pub user_id: DbId,
    pub subject: String,
    pub status: ChatStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Chat annotated with its most recent message for list views.
///
/// `user_email` is populated for the admin listing and `None` for the
/// owner's own listing (the owner already knows who they are).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ChatSummary {
    pub id: DbId,
    pub user_id: DbId,
    pub subject: String,
    pub status: ChatStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub user_email: Option<String>,
    pub last_message_content: Option<String>,
    pub last_message_sender: Option<SenderType>,
    pub last_message_at: Option<Timestamp>,
}

/// Full message row from the `messages` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Message {
    pub id: DbId,
    pub chat_id: DbId,
    pub sender_id: DbId,
    pub sender_type: SenderType,
    pub content: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// Message combined with its attachments, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct MessageWithFiles {
    #[serde(flatten)]
    pub message: Message,
    pub files: Vec<ChatFile>,
}

/// Full attachment row from the `chat_files` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ChatFile {
    pub id: DbId,
    pub message_id: DbId,
    /// Generated on-disk filename (collision-free).
    pub filename: String,
    /// Client-supplied filename, kept for display and download.
    pub original_name: String,
    pub mimetype: String,
    pub size_bytes: i64,
    pub created_at: Timestamp,
}

/// DTO for inserting a message.
#[derive(Debug)]
pub struct CreateMessage {
    pub chat_id: DbId,
    pub sender_id: DbId,
    pub sender_type: SenderType,
    pub content: String,
}

/// DTO for inserting a file attachment row.
#[derive(Debug)]
pub struct CreateChatFile {
    pub message_id: DbId,
    pub filename: String,
    pub original_name: String,
    pub mimetype: String,
    pub size_bytes: i64,
}
