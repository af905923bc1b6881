//! Integration tests for the support chat repositories: chat lifecycle,
//! message ordering, read tracking, and attachment rows.

use rust_decimal::Decimal;
use sqlx::PgPool;

use hostdesk_core::types::DbId;
use hostdesk_db::models::chat::{CreateChatFile, CreateMessage};
use hostdesk_db::models::status::{ChatStatus, SenderType};
use hostdesk_db::models::user::CreateUser;
use hostdesk_db::repositories::{ChatFileRepo, ChatRepo, MessageRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, email: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "x".to_string(),
            role: "USER".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn send(pool: &PgPool, chat_id: DbId, sender_id: DbId, sender: SenderType, text: &str) -> DbId {
    MessageRepo::create(
        pool,
        &CreateMessage {
            chat_id,
            sender_id,
            sender_type: sender,
            content: text.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Chat lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_open_and_close_chat(pool: PgPool) {
    let user_id = seed_user(&pool, "chatter@test.com").await;

    let chat = ChatRepo::create(&pool, user_id, "Technical support")
        .await
        .unwrap();
    assert_eq!(chat.status, ChatStatus::Active);
    assert_eq!(chat.subject, "Technical support");

    let closed = ChatRepo::close(&pool, chat.id).await.unwrap();
    assert!(closed);

    let chat = ChatRepo::find_by_id(&pool, chat.id).await.unwrap().unwrap();
    assert_eq!(chat.status, ChatStatus::Closed);

    // Repeated close is a no-op, not an error.
    assert!(ChatRepo::close(&pool, chat.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_closed_chats_leave_admin_queue(pool: PgPool) {
    let user_id = seed_user(&pool, "queue@test.com").await;
    let open = ChatRepo::create(&pool, user_id, "Open one").await.unwrap();
    let closed = ChatRepo::create(&pool, user_id, "Closed one").await.unwrap();
    ChatRepo::close(&pool, closed.id).await.unwrap();

    let active = ChatRepo::list_active(&pool).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, open.id);
    assert_eq!(active[0].user_email.as_deref(), Some("queue@test.com"));

    // The owner still sees both chats.
    let own = ChatRepo::list_for_user(&pool, user_id).await.unwrap();
    assert_eq!(own.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_chat_summary_carries_last_message(pool: PgPool) {
    let user_id = seed_user(&pool, "summary@test.com").await;
    let chat = ChatRepo::create(&pool, user_id, "Help").await.unwrap();

    send(&pool, chat.id, user_id, SenderType::User, "first").await;
    send(&pool, chat.id, user_id, SenderType::User, "second").await;

    let own = ChatRepo::list_for_user(&pool, user_id).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].last_message_content.as_deref(), Some("second"));
    assert_eq!(own[0].last_message_sender, Some(SenderType::User));
}

// ---------------------------------------------------------------------------
// Messages and read tracking
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_messages_ordered_oldest_first(pool: PgPool) {
    let user_id = seed_user(&pool, "order@test.com").await;
    let chat = ChatRepo::create(&pool, user_id, "Help").await.unwrap();

    send(&pool, chat.id, user_id, SenderType::User, "one").await;
    send(&pool, chat.id, user_id, SenderType::Admin, "two").await;
    send(&pool, chat.id, user_id, SenderType::User, "three").await;

    let messages = MessageRepo::list_for_chat(&pool, chat.id).await.unwrap();
    let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["one", "two", "three"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_read_flip_only_touches_user_messages(pool: PgPool) {
    let user_id = seed_user(&pool, "read@test.com").await;
    let chat = ChatRepo::create(&pool, user_id, "Help").await.unwrap();

    send(&pool, chat.id, user_id, SenderType::User, "question").await;
    send(&pool, chat.id, user_id, SenderType::Admin, "answer").await;

    let flipped = MessageRepo::mark_user_messages_read(&pool, chat.id)
        .await
        .unwrap();
    assert_eq!(flipped, 1);

    // Idempotent past the first call.
    let again = MessageRepo::mark_user_messages_read(&pool, chat.id)
        .await
        .unwrap();
    assert_eq!(again, 0);

    let messages = MessageRepo::list_for_chat(&pool, chat.id).await.unwrap();
    assert!(messages[0].is_read);
    // Admin messages keep their own flag.
    assert!(!messages[1].is_read);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unread_count_skips_closed_chats(pool: PgPool) {
    let user_id = seed_user(&pool, "unread@test.com").await;
    let open = ChatRepo::create(&pool, user_id, "Open").await.unwrap();
    let closed = ChatRepo::create(&pool, user_id, "Closed").await.unwrap();

    send(&pool, open.id, user_id, SenderType::User, "hello").await;
    send(&pool, closed.id, user_id, SenderType::User, "stale").await;
    ChatRepo::close(&pool, closed.id).await.unwrap();

    let count = MessageRepo::unread_count_active(&pool).await.unwrap();
    assert_eq!(count, 1);
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_attachment_rows(pool: PgPool) {
    let user_id = seed_user(&pool, "files@test.com").await;
    let chat = ChatRepo::create(&pool, user_id, "Help").await.unwrap();
    let message_id = send(&pool, chat.id, user_id, SenderType::User, "see attached").await;

    let file = ChatFileRepo::create(
        &pool,
        &CreateChatFile {
            message_id,
            filename: "abc123_report.pdf".to_string(),
            original_name: "report.pdf".to_string(),
            mimetype: "application/pdf".to_string(),
            size_bytes: 2048,
        },
    )
    .await
    .unwrap();

    assert_eq!(file.original_name, "report.pdf");

    let for_message = ChatFileRepo::list_for_message(&pool, message_id)
        .await
        .unwrap();
    assert_eq!(for_message.len(), 1);

    let for_chat = ChatFileRepo::list_for_chat(&pool, chat.id).await.unwrap();
    assert_eq!(for_chat.len(), 1);
    assert_eq!(for_chat[0].id, file.id);
}

// Balance column sanity: the check constraint rejects a negative balance.
#[sqlx::test(migrations = "./migrations")]
async fn test_negative_balance_rejected_by_schema(pool: PgPool) {
    let user_id = seed_user(&pool, "negative@test.com").await;

    let result = UserRepo::top_up(&pool, user_id, Decimal::from(-10)).await;
    assert!(result.is_err(), "check constraint must reject negative balance");
}
