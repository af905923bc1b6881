pub mod billing;
pub mod chat;
pub mod health;
pub mod portfolio;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /user/registration                 register (public)
/// /user/login                        login (public)
/// /user/auth                         verify token, reissue (requires auth)
/// /user/profile                      get, update (requires auth)
/// /user/balance/top-up                credit balance (requires auth)
/// /user/users                        list all users (admin only)
///
/// /billing/services                  list (auth), create (admin)
/// /billing/services/{id}             update, soft delete (admin only)
/// /billing/invoices                  create (admin only)
/// /billing/invoices/my               own invoices (requires auth)
/// /billing/invoices/all              all invoices (admin only)
/// /billing/invoices/{id}/pay         pay from balance (requires auth)
/// /billing/invoices/{id}/cancel      cancel (admin only)
/// /billing/statistics                billing statistics (admin only)
///
/// /chat                              open own chat (POST), list own (GET /my)
/// /chat/all                          list active chats (admin only)
/// /chat/{id}/messages                list (auth), send multipart (auth)
/// /chat/{id}/close                   close chat, PUT (admin only)
/// /chat/unread-count                 unread user messages (admin only)
/// /chat/files/{id}/download          download attachment (requires auth)
///
/// /portfolio                         list (public), create multipart (admin)
/// /portfolio/{id}                    delete (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/user", user::router())
        .nest("/billing", billing::router())
        .nest("/chat", chat::router())
        .nest("/portfolio", portfolio::router())
}
