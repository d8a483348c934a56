//! HTTP exposure of the invoice forms
//!
//! Form posts are decoded into [`FormData`](crate::core::FormData), handed to
//! the [`InvoiceActions`](crate::actions::InvoiceActions), and the outcome is
//! turned into a response:
//!
//! - redirect → `303 See Other` with `Location`
//! - rejected input → `422` with the form state
//! - store failure → `500` with the form state
//! - fatal fault → `500` with an error body

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::{AppState, EditInvoicePage};
