//! Route definitions for the `/user` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{auth, user};
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// POST /registration      -> register (public)
/// POST /login             -> login (public)
/// GET  /auth              -> verify token, reissue fresh one (requires auth)
/// GET  /profile           -> own profile (requires auth)
/// PUT  /profile           -> update domain / server IP (requires auth)
/// POST /balance/top-up     -> credit own balance (requires auth)
/// GET  /users             -> list all users (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/registration", post(auth::registration))
        .route("/login", post(auth::login))
        .route("/auth", get(auth::check))
        .route("/profile", get(user::get_profile).put(user::update_profile))
        .route("/balance/top-up", post(user::top_up_balance))
        .route("/users", get(user::list_users))
}
