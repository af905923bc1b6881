//! Repository for the `chat_files` table.

use hostdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::chat::{ChatFile, CreateChatFile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, message_id, filename, original_name, mimetype, size_bytes, created_at";

/// Provides attachment-row operations.
pub struct ChatFileRepo;

impl ChatFileRepo {
    /// Insert an attachment row, returning the created record.
    pub async fn create(pool: &PgPool, input: &CreateChatFile) -> Result<ChatFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO chat_files (message_id, filename, original_name, mimetype, size_bytes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChatFile>(&query)
            .bind(input.message_id)
            .bind(&input.filename)
            .bind(&input.original_name)
            .bind(&input.mimetype)
            .bind(input.size_bytes)
            .fetch_one(pool)
            .await
    }

    /// Find an attachment by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ChatFile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chat_files WHERE id = $1");
        sqlx::query_as::<_, ChatFile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all attachments belonging to messages of one chat, oldest first.
    ///
    /// Fetched in one query so assembling messages-with-files stays two
    /// round-trips regardless of message count.
    pub async fn list_for_chat(pool: &PgPool, chat_id: DbId) -> Result<Vec<ChatFile>, sqlx::Error> {
        sqlx::query_as::<_, ChatFile>(
            "SELECT f.id, f.message_id, f.filename, f.original_name, f.mimetype,
                    f.size_bytes, f.created_at
             FROM chat_files f
             JOIN messages m ON m.id = f.message_id
             WHERE m.chat_id = $1
             ORDER BY f.created_at ASC",
        )
        .bind(chat_id)
        .fetch_all(pool)
        .await
    }

    /// List attachments for a single message, oldest first.
    pub async fn list_for_message(
        pool: &PgPool,
        message_id: DbId,
    ) -> Result<Vec<ChatFile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chat_files WHERE message_id = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, ChatFile>(&query)
            .bind(message_id)
            .fetch_all(pool)
            .await
    }
}
