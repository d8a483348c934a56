//! Create, update and delete handlers for invoices
//!
//! Create and update follow the same sequence:
//!
//! ```text
//! validate ──✗──▶ Rejected(errors + message)
//!    │
//!    ▼
//! persist ──✗──▶ Failed(message)          (cause logged, never returned)
//!    │
//!    ▼
//! revalidate list view ──▶ Redirect(list view)
//! ```

use super::ActionOutcome;
use crate::config::InvoicesConfig;
use crate::core::validation::{parse_create, parse_update};
use crate::core::{
    FormData, FormState, FormsError, FormsResult, InvoiceChanges, InvoiceStore, NewInvoice,
    Revalidator,
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

pub const CREATE_VALIDATION_ERROR: &str = "Missing Fields. Failed to Create Invoice.";
pub const CREATE_DB_ERROR: &str = "Database Error: Failed to Create Invoice.";
pub const UPDATE_VALIDATION_ERROR: &str = "Missing Fields. Failed to Update Invoice.";
pub const UPDATE_DB_ERROR: &str = "Database Error: Failed to Update Invoice.";
pub const DELETE_FATAL: &str = "Failed to Delete Invoice";
pub const DELETE_DB_ERROR: &str = "Database Error: Failed to Delete Invoice.";
pub const DELETE_SUCCESS: &str = "Deleted Invoice.";

/// Invoice form handlers
///
/// Holds the store and the view invalidation capability explicitly; cheap to
/// clone.
#[derive(Clone)]
pub struct InvoiceActions {
    store: Arc<dyn InvoiceStore>,
    revalidator: Arc<dyn Revalidator>,
    list_path: String,
    allow_delete: bool,
}

impl InvoiceActions {
    /// Create handlers with the default settings (list view at
    /// `/dashboard/invoices`, delete disabled)
    pub fn new(store: Arc<dyn InvoiceStore>, revalidator: Arc<dyn Revalidator>) -> Self {
        Self::with_config(store, revalidator, &InvoicesConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn InvoiceStore>,
        revalidator: Arc<dyn Revalidator>,
        config: &InvoicesConfig,
    ) -> Self {
        Self {
            store,
            revalidator,
            list_path: config.list_path.clone(),
            allow_delete: config.allow_delete,
        }
    }

    /// Path of the invoices list view
    pub fn list_path(&self) -> &str {
        &self.list_path
    }

    /// Handle the create form
    ///
    /// `_prev_state` is the state the form currently shows; it does not
    /// influence the outcome.
    pub async fn create_invoice(&self, _prev_state: &FormState, form: &FormData) -> ActionOutcome {
        let input = match parse_create(form) {
            Ok(input) => input,
            Err(errors) => {
                tracing::debug!(fields = ?errors.fields(), "create invoice rejected");
                return ActionOutcome::Rejected(FormState::invalid(
                    errors,
                    CREATE_VALIDATION_ERROR,
                ));
            }
        };

        let invoice = NewInvoice {
            customer_id: input.customer_id,
            amount: input.amount,
            status: input.status,
            date: today(),
        };

        match self.store.insert(invoice).await {
            Ok(id) => {
                tracing::info!(invoice_id = %id, "invoice created");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to create invoice");
                return ActionOutcome::Failed(FormState::message(CREATE_DB_ERROR));
            }
        }

        self.revalidator.revalidate_path(&self.list_path);
        ActionOutcome::redirect(&self.list_path)
    }

    /// Handle the edit form; the invoice id travels in the form as `id`
    ///
    /// An id matching no invoice updates nothing and still redirects.
    pub async fn update_invoice(&self, form: &FormData) -> ActionOutcome {
        let input = match parse_update(form) {
            Ok(input) => input,
            Err(errors) => {
                tracing::debug!(fields = ?errors.fields(), "update invoice rejected");
                return ActionOutcome::Rejected(FormState::invalid(
                    errors,
                    UPDATE_VALIDATION_ERROR,
                ));
            }
        };

        let changes = InvoiceChanges {
            customer_id: input.customer_id,
            amount: input.amount,
            status: input.status,
        };

        match self.store.update(&input.id, changes).await {
            Ok(rows) => {
                tracing::info!(invoice_id = %input.id, rows, "invoice updated");
            }
            Err(e) => {
                tracing::error!(invoice_id = %input.id, error = %e, "failed to update invoice");
                return ActionOutcome::Failed(FormState::message(UPDATE_DB_ERROR));
            }
        }

        self.revalidator.revalidate_path(&self.list_path);
        ActionOutcome::redirect(&self.list_path)
    }

    /// Handle the delete button
    ///
    /// Unless deletion is enabled in the configuration this always fails with
    /// a fatal error before touching the store or the view cache.
    pub async fn delete_invoice(&self, id: &str) -> FormsResult<ActionOutcome> {
        if !self.allow_delete {
            tracing::warn!(invoice_id = %id, "invoice deletion is disabled");
            return Err(FormsError::fatal(DELETE_FATAL));
        }

        match self.store.delete(id).await {
            Ok(rows) => {
                tracing::info!(invoice_id = %id, rows, "invoice deleted");
                self.revalidator.revalidate_path(&self.list_path);
                Ok(ActionOutcome::Completed(FormState::message(DELETE_SUCCESS)))
            }
            Err(e) => {
                tracing::error!(invoice_id = %id, error = %e, "failed to delete invoice");
                Ok(ActionOutcome::Failed(FormState::message(DELETE_DB_ERROR)))
            }
        }
    }
}

/// Current UTC date
fn today() -> NaiveDate {
    Utc::now().date_naive()
}
