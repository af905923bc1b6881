//! Repository for the `messages` table.

use hostdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::chat::{CreateMessage, Message};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, chat_id, sender_id, sender_type, content, is_read, created_at";

/// Provides message operations within a chat.
pub struct MessageRepo;

impl MessageRepo {
    /// Insert a new unread message, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMessage) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (chat_id, sender_id, sender_type, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(input.chat_id)
            .bind(input.sender_id)
            .bind(input.sender_type)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// List a chat's messages ordered oldest to newest.
    pub async fn list_for_chat(pool: &PgPool, chat_id: DbId) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages WHERE chat_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(chat_id)
            .fetch_all(pool)
            .await
    }

    /// Mark every user-sent message in a chat as read.
    ///
    /// The read-receipt flip when an admin opens the chat. Matches zero
    /// rows on a repeated call, so it is a no-op past the first.
    pub async fn mark_user_messages_read(
        pool: &PgPool,
        chat_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = true
             WHERE chat_id = $1 AND sender_type = 'user' AND is_read = false",
        )
        .bind(chat_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Count unread user-sent messages across all active chats.
    pub async fn unread_count_active(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages m
             JOIN chats c ON c.id = m.chat_id
             WHERE m.sender_type = 'user' AND m.is_read = false AND c.status = 'active'",
        )
        .fetch_one(pool)
        .await
    }
}
