//! HTTP handlers for the invoice forms and page data

use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::actions::{ActionOutcome, InvoiceActions};
use crate::core::{
    Customer, CustomerDirectory, FormData, FormState, FormsError, Invoice, InvoiceStore,
    StorageError,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub actions: InvoiceActions,
    pub store: Arc<dyn InvoiceStore>,
    pub customers: Arc<dyn CustomerDirectory>,
}

/// Response for the edit page data endpoint
#[derive(Debug, Serialize)]
pub struct EditInvoicePage {
    pub invoice: Invoice,
    pub customers: Vec<Customer>,
}

impl IntoResponse for ActionOutcome {
    fn into_response(self) -> Response {
        match self {
            ActionOutcome::Redirect { location } => Redirect::to(&location).into_response(),
            ActionOutcome::Rejected(state) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(state)).into_response()
            }
            ActionOutcome::Failed(state) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(state)).into_response()
            }
            ActionOutcome::Completed(state) => (StatusCode::OK, Json(state)).into_response(),
        }
    }
}

/// Create form submission
///
/// POST /dashboard/invoices/create
pub async fn create_invoice(
    State(state): State<AppState>,
    Form(form): Form<FormData>,
) -> ActionOutcome {
    state
        .actions
        .create_invoice(&FormState::default(), &form)
        .await
}

/// Edit form submission; the path id replaces any posted `id`
///
/// POST /dashboard/invoices/{id}/edit
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(mut form): Form<FormData>,
) -> ActionOutcome {
    form.insert("id", id);
    state.actions.update_invoice(&form).await
}

/// Delete button
///
/// POST /dashboard/invoices/{id}/delete
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ActionOutcome, FormsError> {
    state.actions.delete_invoice(&id).await
}

/// Invoices list data
///
/// GET /dashboard/invoices
pub async fn list_invoices(State(state): State<AppState>) -> Result<Json<Value>, FormsError> {
    let invoices = state.store.list().await?;
    Ok(Json(json!({
        "count": invoices.len(),
        "invoices": invoices,
    })))
}

/// Edit page data: the invoice and the customers it may be assigned to
///
/// GET /dashboard/invoices/{id}/edit
pub async fn edit_invoice_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EditInvoicePage>, FormsError> {
    let not_found = || FormsError::NotFound {
        entity_type: "invoice".to_string(),
        id: id.clone(),
    };

    let (invoice, customers) =
        tokio::try_join!(state.store.get(&id), state.customers.customers()).map_err(
            |e| match e {
                StorageError::InvalidIdentifier { .. } => not_found(),
                other => FormsError::Storage(other),
            },
        )?;

    let invoice = invoice.ok_or_else(not_found)?;
    Ok(Json(EditInvoicePage { invoice, customers }))
}

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "invoice-forms"
    }))
}
