//! Route definitions for the `/portfolio` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use hostdesk_core::uploads::MAX_PORTFOLIO_IMAGE_BYTES;

use crate::handlers::portfolio;
use crate::state::AppState;

/// Request-body ceiling for item creation: one image plus headroom for the
/// multipart framing and text fields. The image size itself is enforced by
/// `validate_portfolio_image`.
const CREATE_BODY_LIMIT: usize = MAX_PORTFOLIO_IMAGE_BYTES + 1024 * 1024;

/// Routes mounted at `/portfolio`.
///
/// ```text
/// GET    /        -> list portfolio items (public)
/// POST   /        -> create item, multipart with image (admin only)
/// DELETE /{id}    -> delete item (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(portfolio::list_items)
                .post(portfolio::create_item)
                .layer(DefaultBodyLimit::max(CREATE_BODY_LIMIT)),
        )
        .route("/{id}", axum::routing::delete(portfolio::delete_item))
}
