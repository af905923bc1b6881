//! Repository for the `chats` table.

use hostdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::chat::{Chat, ChatSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, subject, status, created_at, updated_at";

/// Provides chat lifecycle operations.
pub struct ChatRepo;

impl ChatRepo {
    /// Open a new active chat for a user.
    pub async fn create(pool: &PgPool, user_id: DbId, subject: &str) -> Result<Chat, sqlx::Error> {
        let query = format!(
            "INSERT INTO chats (user_id, subject) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Chat>(&query)
            .bind(user_id)
            .bind(subject)
            .fetch_one(pool)
            .await
    }

    /// Find a chat by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Chat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chats WHERE id = $1");
        sqlx::query_as::<_, Chat>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's chats with their latest message, newest-updated first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ChatSummary>, sqlx::Error> {
        sqlx::query_as::<_, ChatSummary>(
            "SELECT c.id, c.user_id, c.subject, c.status, c.created_at, c.updated_at,
                    NULL::text AS user_email,
                    m.content AS last_message_content,
                    m.sender_type AS last_message_sender,
                    m.created_at AS last_message_at
             FROM chats c
             LEFT JOIN LATERAL (
                 SELECT content, sender_type, created_at
                 FROM messages
                 WHERE chat_id = c.id
                 ORDER BY created_at DESC, id DESC
                 LIMIT 1
             ) m ON true
             WHERE c.user_id = $1
             ORDER BY c.updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// List all active chats with owner email and latest message, for the
    /// back office queue. Newest-updated first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<ChatSummary>, sqlx::Error> {
        sqlx::query_as::<_, ChatSummary>(
            "SELECT c.id, c.user_id, c.subject, c.status, c.created_at, c.updated_at,
                    u.email AS user_email,
                    m.content AS last_message_content,
                    m.sender_type AS last_message_sender,
                    m.created_at AS last_message_at
             FROM chats c
             JOIN users u ON u.id = c.user_id
             LEFT JOIN LATERAL (
                 SELECT content, sender_type, created_at
                 FROM messages
                 WHERE chat_id = c.id
                 ORDER BY created_at DESC, id DESC
                 LIMIT 1
             ) m ON true
             WHERE c.status = 'active'
             ORDER BY c.updated_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Close a chat. Writes `closed` without checking the current state,
    /// so a repeated close is a harmless no-op in effect.
    ///
    /// Returns `false` if no chat with this id exists.
    pub async fn close(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE chats SET status = 'closed', updated_at = now() WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bump the chat's `updated_at` so it sorts to the top of list views.
    pub async fn touch(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE chats SET updated_at = now() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
