//! Router builder for the invoice routes

use super::handlers::{
    AppState, create_invoice, delete_invoice, edit_invoice_page, health_check, list_invoices,
    update_invoice,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build the invoice routes under `list_path`
///
/// - POST {list_path}/create - Create form submission
/// - GET  {list_path} - Invoices list data
/// - GET  {list_path}/{id}/edit - Edit page data
/// - POST {list_path}/{id}/edit - Edit form submission
/// - POST {list_path}/{id}/delete - Delete button
pub fn build_invoice_routes(state: AppState, list_path: &str) -> Router {
    let base = list_path.trim_end_matches('/');
    Router::new()
        .route(base, get(list_invoices))
        .route(&format!("{}/create", base), post(create_invoice))
        .route(
            &format!("{}/{{id}}/edit", base),
            get(edit_invoice_page).post(update_invoice),
        )
        .route(&format!("{}/{{id}}/delete", base), post(delete_invoice))
        .with_state(state)
}

/// Build health check routes
pub fn build_health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}
