//! Route definitions for the `/billing` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{invoice, service};
use crate::state::AppState;

/// Routes mounted at `/billing`.
///
/// ```text
/// GET    /services               -> active service catalog (requires auth)
/// POST   /services               -> create service (admin only)
/// PUT    /services/{id}          -> update service (admin only)
/// DELETE /services/{id}          -> soft-delete service (admin only)
///
/// POST   /invoices               -> issue invoice (admin only)
/// GET    /invoices/my            -> own invoices (requires auth)
/// GET    /invoices/all           -> all invoices (admin only)
/// POST   /invoices/{id}/pay      -> pay from balance (requires auth)
/// POST   /invoices/{id}/cancel   -> cancel pending invoice (admin only)
///
/// GET    /statistics             -> billing statistics (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/services",
            get(service::list_services).post(service::create_service),
        )
        .route(
            "/services/{id}",
            axum::routing::put(service::update_service).delete(service::delete_service),
        )
        .route("/invoices", post(invoice::create_invoice))
        .route("/invoices/my", get(invoice::my_invoices))
        .route("/invoices/all", get(invoice::all_invoices))
        .route("/invoices/{id}/pay", post(invoice::pay_invoice))
        .route("/invoices/{id}/cancel", post(invoice::cancel_invoice))
        .route("/statistics", get(invoice::statistics))
}
