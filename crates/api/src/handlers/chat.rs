//! Handlers for the support chat: chat lifecycle, message history,
//! multipart message upload, and attachment download.

use std::collections::HashMap;

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;
use axum::Json;
use hostdesk_core::error::CoreError;
use hostdesk_core::roles::ROLE_ADMIN;
use hostdesk_core::types::DbId;
use hostdesk_core::uploads::{chat_storage_filename, validate_chat_file, MAX_CHAT_FILES};
use hostdesk_db::models::chat::{
    Chat, ChatFile, ChatSummary, CreateChatFile, CreateMessage, MessageWithFiles,
};
use hostdesk_db::models::status::SenderType;
use hostdesk_db::repositories::{ChatFileRepo, ChatRepo, MessageRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Subject assigned when the client opens a chat without one.
const DEFAULT_SUBJECT: &str = "Technical support";

/// Request body for `POST /chat`. The whole body is optional.
#[derive(Debug, Default, Deserialize)]
pub struct CreateChatRequest {
    pub subject: Option<String>,
}

/// Response for `GET /chat/unread-count`.
#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

/// One collected multipart file, validated before anything is persisted.
struct UploadedFile {
    original_name: String,
    mimetype: String,
    data: axum::body::Bytes,
}

/// POST /api/chat
///
/// Open a new chat for the authenticated user. The subject defaults to
/// "Technical support" when omitted or blank.
pub async fn create_chat(
    State(state): State<AppState>,
    auth_user: AuthUser,
    body: Option<Json<CreateChatRequest>>,
) -> AppResult<(StatusCode, Json<DataResponse<Chat>>)> {
    let input = body.map(|Json(b)| b).unwrap_or_default();
    let subject = match input.subject {
        Some(s) if !s.trim().is_empty() => s,
        _ => DEFAULT_SUBJECT.to_string(),
    };

    let chat = ChatRepo::create(&state.pool, auth_user.user_id, &subject).await?;

    tracing::info!(chat_id = chat.id, user_id = auth_user.user_id, "chat opened");

    Ok((StatusCode::CREATED, Json(DataResponse { data: chat })))
}

/// GET /api/chat/my
///
/// List the authenticated user's chats with their latest message.
pub async fn my_chats(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ChatSummary>>>> {
    let chats = ChatRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: chats }))
}

/// GET /api/chat/all
///
/// List all active chats for the back office queue. Admin only.
pub async fn all_chats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<ChatSummary>>>> {
    let chats = ChatRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: chats }))
}

/// GET /api/chat/unread-count
///
/// Count unread user-sent messages across all active chats. Admin only.
/// Drives the badge in the back office navigation.
pub async fn unread_count(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<UnreadCountResponse>>> {
    let count = MessageRepo::unread_count_active(&state.pool).await?;
    Ok(Json(DataResponse {
        data: UnreadCountResponse { count },
    }))
}

/// GET /api/chat/{id}/messages
///
/// Message history with attachments, oldest first. Owner or admin only.
/// An admin opening the chat flips all user-sent messages to read.
pub async fn get_messages(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<MessageWithFiles>>>> {
    let chat = load_chat_checked(&state, id, &auth_user).await?;

    if auth_user.role == ROLE_ADMIN {
        MessageRepo::mark_user_messages_read(&state.pool, chat.id).await?;
    }

    let messages = MessageRepo::list_for_chat(&state.pool, chat.id).await?;
    let files = ChatFileRepo::list_for_chat(&state.pool, chat.id).await?;

    // Group attachments by message in one pass.
    let mut by_message: HashMap<DbId, Vec<ChatFile>> = HashMap::new();
    for file in files {
        by_message.entry(file.message_id).or_default().push(file);
    }

    let messages = messages
        .into_iter()
        .map(|message| {
            let files = by_message.remove(&message.id).unwrap_or_default();
            MessageWithFiles { message, files }
        })
        .collect();

    Ok(Json(DataResponse { data: messages }))
}

/// POST /api/chat/{id}/messages
///
/// Send a message into a chat as multipart form data: a `content` text
/// field plus up to five `files` attachments. Every attachment is
/// validated before anything is written, so a rejected upload leaves no
/// partial rows or files behind.
pub async fn send_message(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<MessageWithFiles>>)> {
    let chat = load_chat_checked(&state, id, &auth_user).await?;

    let mut content = String::new();
    let mut uploads: Vec<UploadedFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        match field.name() {
            Some("content") => {
                content = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            Some("files") => {
                if uploads.len() >= MAX_CHAT_FILES {
                    return Err(AppError::Core(CoreError::Validation(format!(
                        "At most {MAX_CHAT_FILES} files per message"
                    ))));
                }

                let original_name = field.file_name().unwrap_or("file").to_string();
                let mimetype = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;

                validate_chat_file(&mimetype, data.len())?;

                uploads.push(UploadedFile {
                    original_name,
                    mimetype,
                    data,
                });
            }
            _ => {}
        }
    }

    if content.trim().is_empty() && uploads.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Message must have text or at least one file".into(),
        )));
    }

    let sender_type = if auth_user.role == ROLE_ADMIN {
        SenderType::Admin
    } else {
        SenderType::User
    };

    let message = MessageRepo::create(
        &state.pool,
        &CreateMessage {
            chat_id: chat.id,
            sender_id: auth_user.user_id,
            sender_type,
            content,
        },
    )
    .await?;

    // Persist attachments: bytes to disk first, then the row.
    tokio::fs::create_dir_all(&state.config.chat_upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    let mut files = Vec::with_capacity(uploads.len());
    for upload in uploads {
        let filename = chat_storage_filename(&upload.original_name);
        let dest = state.config.chat_upload_dir.join(&filename);
        tokio::fs::write(&dest, &upload.data)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store file: {e}")))?;

        let file = ChatFileRepo::create(
            &state.pool,
            &CreateChatFile {
                message_id: message.id,
                filename,
                original_name: upload.original_name,
                mimetype: upload.mimetype,
                size_bytes: upload.data.len() as i64,
            },
        )
        .await?;
        files.push(file);
    }

    // Bump the chat so it sorts to the top of list views.
    ChatRepo::touch(&state.pool, chat.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: MessageWithFiles { message, files },
        }),
    ))
}

/// PUT /api/chat/{id}/close
///
/// Close a chat. Admin only. Closing an already-closed chat is a no-op.
pub async fn close_chat(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let closed = ChatRepo::close(&state.pool, id).await?;
    if !closed {
        return Err(AppError::Core(CoreError::NotFound { entity: "chat", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/chat/files/{id}/download
///
/// Stream an attachment back to the client with its original filename.
/// Access mirrors the owning chat: owner or admin.
pub async fn download_file(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let file = ChatFileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "file", id }))?;

    // Resolve the owning chat through the message for the access check.
    let chat_id: DbId =
        sqlx::query_scalar("SELECT chat_id FROM messages WHERE id = $1")
            .bind(file.message_id)
            .fetch_one(&state.pool)
            .await?;
    load_chat_checked(&state, chat_id, &auth_user).await?;

    let path = state.config.chat_upload_dir.join(&file.filename);
    let data = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::Core(CoreError::NotFound { entity: "file", id })
        } else {
            AppError::InternalError(format!("Failed to read stored file: {e}"))
        }
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&file.mimetype)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    let disposition = format!(
        "attachment; filename=\"{}\"",
        file.original_name.replace('"', "")
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
    );

    let mut response = Response::new(Body::from(data));
    *response.headers_mut() = headers;
    Ok(response)
}

/// Load a chat and enforce owner-or-admin access.
async fn load_chat_checked(
    state: &AppState,
    chat_id: DbId,
    auth_user: &AuthUser,
) -> AppResult<Chat> {
    let chat = ChatRepo::find_by_id(&state.pool, chat_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound {
            entity: "chat",
            id: chat_id,
        }))?;

    if chat.user_id != auth_user.user_id && auth_user.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not your chat".into(),
        )));
    }

    Ok(chat)
}
