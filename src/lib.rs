//! # invoice-forms
//!
//! Server-side form handling for an invoicing admin dashboard.
//!
//! A form submission goes through three steps:
//!
//! 1. **Validation**: the raw form fields are coerced and checked against the
//!    invoice schema; failures are reported per field.
//! 2. **Persistence**: a single INSERT, UPDATE or DELETE against the invoice
//!    store.
//! 3. **Invalidation & navigation**: the invoices list view is marked stale and
//!    the caller is told where to navigate.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoice_forms::prelude::*;
//!
//! let store = InMemoryInvoiceStore::new();
//! let actions = InvoiceActions::new(Arc::new(store), Arc::new(ViewCache::default()));
//!
//! let form = FormData::new()
//!     .with("customerId", "c1")
//!     .with("amount", "12.50")
//!     .with("status", "pending");
//!
//! match actions.create_invoice(&FormState::default(), &form).await {
//!     ActionOutcome::Redirect { location } => println!("go to {}", location),
//!     other => println!("{:?}", other.state()),
//! }
//! ```

pub mod actions;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Cents, ConfigError, Customer, CustomerDirectory, FieldErrors, FormData, FormState,
        FormsError, FormsResult, Invoice, InvoiceChanges, InvoiceStatus, InvoiceStore, NewInvoice,
        RevalidationEvent, Revalidator, StorageError, ViewCache,
    };

    // === Actions ===
    pub use crate::actions::{ActionOutcome, InvoiceActions};

    // === Storage ===
    pub use crate::storage::InMemoryInvoiceStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::{PostgresInvoiceStore, ensure_schema};

    // === Config ===
    pub use crate::config::{AppConfig, DatabaseConfig, InvoicesConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
