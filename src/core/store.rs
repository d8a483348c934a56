//! Store traits for invoices and customers

use crate::core::error::StorageError;
use crate::core::invoice::{Customer, Invoice, InvoiceChanges, NewInvoice};
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence capability for invoices
///
/// Every write is a single statement; implementations never wrap calls in a
/// multi-statement transaction and never read before writing. Identifiers are
/// taken as the raw strings posted by the forms so that interpreting them is
/// left to the backend.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a new invoice and return its identifier
    async fn insert(&self, invoice: NewInvoice) -> Result<Uuid, StorageError>;

    /// Update customer, amount and status of an invoice
    ///
    /// Returns the number of affected rows; an unknown id affects zero rows
    /// and is not an error.
    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<u64, StorageError>;

    /// Delete an invoice, returning the number of affected rows
    async fn delete(&self, id: &str) -> Result<u64, StorageError>;

    /// Get an invoice by ID
    async fn get(&self, id: &str) -> Result<Option<Invoice>, StorageError>;

    /// List all invoices, newest first
    async fn list(&self) -> Result<Vec<Invoice>, StorageError>;

    /// Release the underlying resources
    ///
    /// Called once at shutdown.
    async fn close(&self) {}
}

/// Read-only source of the customers an invoice can reference
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    /// List customers ordered by name
    async fn customers(&self) -> Result<Vec<Customer>, StorageError>;
}

/// Interpret a posted invoice identifier
///
/// Shared by every backend so that a malformed id is reported the same way
/// everywhere.
pub fn parse_invoice_id(id: &str) -> Result<Uuid, StorageError> {
    Uuid::parse_str(id.trim()).map_err(|_| StorageError::InvalidIdentifier {
        value: id.to_string(),
    })
}
