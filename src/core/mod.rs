//! Core module containing the invoice model, form validation and the traits
//! the handlers are written against

pub mod error;
pub mod form;
pub mod invoice;
pub mod revalidate;
pub mod store;
pub mod validation;

pub use error::{ConfigError, FormsError, FormsResult, StorageError};
pub use form::{FieldErrors, FormData, FormState};
pub use invoice::{Cents, Customer, Invoice, InvoiceChanges, InvoiceStatus, NewInvoice};
pub use revalidate::{RevalidationEvent, Revalidator, ViewCache};
pub use store::{CustomerDirectory, InvoiceStore, parse_invoice_id};
