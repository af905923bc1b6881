//! Handlers for the public portfolio and its admin management endpoints.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use hostdesk_core::error::CoreError;
use hostdesk_core::types::DbId;
use hostdesk_core::uploads::{image_storage_filename, validate_portfolio_image};
use hostdesk_db::models::portfolio::{CreatePortfolioItem, PortfolioItem};
use hostdesk_db::repositories::PortfolioRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum accepted title length.
const MAX_TITLE_LEN: usize = 100;

/// GET /api/portfolio
///
/// List portfolio entries, newest first. Public, no authentication.
pub async fn list_items(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PortfolioItem>>>> {
    let items = PortfolioRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/portfolio
///
/// Create a portfolio entry from multipart form data. Admin only. Fields:
/// `title` (required, at most 100 characters), `description`, `link`
/// (must be an http/https URL when present), and an optional `image`
/// (images only, 5 MB ceiling).
pub async fn create_item(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<PortfolioItem>>)> {
    let mut title = String::new();
    let mut description: Option<String> = None;
    let mut link: Option<String> = None;
    let mut image: Option<(String, axum::body::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        match field.name() {
            Some("title") => {
                title = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            Some("description") => {
                description = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            Some("link") => {
                link = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            Some("image") => {
                let original_name = field.file_name().unwrap_or("image").to_string();
                let mimetype = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;

                validate_portfolio_image(&mimetype, data.len())?;

                image = Some((image_storage_filename(&original_name), data));
            }
            _ => {}
        }
    }

    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title is required".into(),
        )));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        ))));
    }

    if let Some(link) = &link {
        if !link.is_empty() && !link.starts_with("http://") && !link.starts_with("https://") {
            return Err(AppError::Core(CoreError::Validation(
                "Link must be an http(s) URL".into(),
            )));
        }
    }

    // Persist the image only after all field validation has passed.
    let image_filename = match image {
        Some((filename, data)) => {
            tokio::fs::create_dir_all(&state.config.static_dir)
                .await
                .map_err(|e| {
                    AppError::InternalError(format!("Failed to create static dir: {e}"))
                })?;
            let dest = state.config.static_dir.join(&filename);
            tokio::fs::write(&dest, &data)
                .await
                .map_err(|e| AppError::InternalError(format!("Failed to store image: {e}")))?;
            Some(filename)
        }
        None => None,
    };

    let item = PortfolioRepo::create(
        &state.pool,
        &CreatePortfolioItem {
            title,
            description: description.filter(|d| !d.is_empty()),
            link: link.filter(|l| !l.is_empty()),
            image: image_filename,
        },
    )
    .await?;

    tracing::info!(item_id = item.id, title = %item.title, "portfolio item created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// DELETE /api/portfolio/{id}
///
/// Delete a portfolio entry. Admin only. The stored image file, if any,
/// is left on disk; the static directory is periodically cleaned by ops.
pub async fn delete_item(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PortfolioRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "portfolio item",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
