//! Validation of invoice form input
//!
//! Raw posted strings go through the filters (trim, `Number()`-style coercion),
//! then the schema rules. The outcome is always a tagged result: a typed
//! record on success, a [`FieldErrors`](crate::core::form::FieldErrors) report
//! on failure.

pub mod filters;
pub mod schema;
pub mod validators;

pub use schema::{CreateInvoice, UpdateInvoice, parse_create, parse_update};
