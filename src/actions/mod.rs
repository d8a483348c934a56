//! Form actions: the server-side handlers behind the invoice forms
//!
//! A handler either navigates away (after a successful mutation) or hands a
//! [`FormState`] back to the form. Unrecoverable faults are returned as
//! [`FormsError`](crate::core::FormsError).

pub mod invoices;

pub use invoices::{
    CREATE_DB_ERROR, CREATE_VALIDATION_ERROR, DELETE_DB_ERROR, DELETE_FATAL, DELETE_SUCCESS,
    InvoiceActions, UPDATE_DB_ERROR, UPDATE_VALIDATION_ERROR,
};

use crate::core::FormState;

/// How a form action ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Mutation persisted, views invalidated; the caller must navigate to `location`
    Redirect { location: String },

    /// Input rejected by the schema; nothing was written
    Rejected(FormState),

    /// The store failed; nothing is known to have been written
    Failed(FormState),

    /// Mutation persisted and reported in place
    Completed(FormState),
}

impl ActionOutcome {
    pub fn redirect(location: impl Into<String>) -> Self {
        ActionOutcome::Redirect {
            location: location.into(),
        }
    }

    /// Target of the navigation, if the action redirects
    pub fn location(&self) -> Option<&str> {
        match self {
            ActionOutcome::Redirect { location } => Some(location),
            _ => None,
        }
    }

    /// State handed back to the form, if the action does not redirect
    pub fn state(&self) -> Option<&FormState> {
        match self {
            ActionOutcome::Redirect { .. } => None,
            ActionOutcome::Rejected(state)
            | ActionOutcome::Failed(state)
            | ActionOutcome::Completed(state) => Some(state),
        }
    }

    pub fn into_state(self) -> Option<FormState> {
        match self {
            ActionOutcome::Redirect { .. } => None,
            ActionOutcome::Rejected(state)
            | ActionOutcome::Failed(state)
            | ActionOutcome::Completed(state) => Some(state),
        }
    }
}
