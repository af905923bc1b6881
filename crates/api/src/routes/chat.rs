//! Route definitions for the `/chat` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use hostdesk_core::uploads::{MAX_CHAT_FILES, MAX_CHAT_FILE_BYTES};

use crate::handlers::chat;
use crate::state::AppState;

/// Request-body ceiling for multipart message uploads: the per-file limit
/// times the attachment cap, plus headroom for boundaries and text fields.
/// Per-file size is still enforced by `validate_chat_file`.
const MESSAGE_BODY_LIMIT: usize = MAX_CHAT_FILES * MAX_CHAT_FILE_BYTES + 1024 * 1024;

/// Routes mounted at `/chat`.
///
/// ```text
/// POST /                      -> open (or return) own chat (requires auth)
/// GET  /my                    -> list own chats (requires auth)
/// GET  /all                   -> list active chats (admin only)
/// GET  /unread-count          -> count unread user messages (admin only)
/// GET  /{id}/messages         -> message history with files (requires auth)
/// POST /{id}/messages         -> send message, multipart (requires auth)
/// PUT  /{id}/close            -> close chat (admin only)
/// GET  /files/{id}/download   -> download attachment (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(chat::create_chat))
        .route("/my", get(chat::my_chats))
        .route("/all", get(chat::all_chats))
        .route("/unread-count", get(chat::unread_count))
        .route(
            "/{id}/messages",
            get(chat::get_messages)
                .post(chat::send_message)
                .layer(DefaultBodyLimit::max(MESSAGE_BODY_LIMIT)),
        )
        .route("/{id}/close", put(chat::close_chat))
        .route("/files/{id}/download", get(chat::download_file))
}
