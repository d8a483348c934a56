//! In-memory implementation of InvoiceStore for testing and development

use crate::core::{
    Customer, CustomerDirectory, Invoice, InvoiceChanges, InvoiceStore, NewInvoice, StorageError,
    parse_invoice_id,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory invoice store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Identifiers are UUIDs; a malformed identifier is rejected with
/// `InvalidIdentifier`.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceStore {
    invoices: Arc<RwLock<HashMap<Uuid, Invoice>>>,
    customers: Arc<RwLock<Vec<Customer>>>,
}

impl InMemoryInvoiceStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with customers
    pub fn with_customers(customers: Vec<Customer>) -> Self {
        Self {
            invoices: Arc::new(RwLock::new(HashMap::new())),
            customers: Arc::new(RwLock::new(customers)),
        }
    }

    /// Insert a full row as-is (seeding, tests)
    pub fn seed(&self, invoice: Invoice) -> Result<(), StorageError> {
        self.invoices
            .write()
            .map_err(|_| poisoned())?
            .insert(invoice.id, invoice);
        Ok(())
    }

    /// Number of stored invoices
    pub fn len(&self) -> usize {
        self.invoices.read().map(|i| i.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StorageError {
    StorageError::Unavailable {
        backend: "in-memory".to_string(),
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<Uuid, StorageError> {
        let mut invoices = self.invoices.write().map_err(|_| poisoned())?;

        let mut id = Uuid::new_v4();
        while invoices.contains_key(&id) {
            id = Uuid::new_v4();
        }

        invoices.insert(
            id,
            Invoice {
                id,
                customer_id: invoice.customer_id,
                amount: invoice.amount,
                status: invoice.status,
                date: invoice.date,
            },
        );

        Ok(id)
    }

    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<u64, StorageError> {
        let id = parse_invoice_id(id)?;
        let mut invoices = self.invoices.write().map_err(|_| poisoned())?;

        let Some(invoice) = invoices.get_mut(&id) else {
            return Ok(0);
        };

        invoice.customer_id = changes.customer_id;
        invoice.amount = changes.amount;
        invoice.status = changes.status;

        Ok(1)
    }

    async fn delete(&self, id: &str) -> Result<u64, StorageError> {
        let id = parse_invoice_id(id)?;
        let mut invoices = self.invoices.write().map_err(|_| poisoned())?;

        Ok(invoices.remove(&id).map_or(0, |_| 1))
    }

    async fn get(&self, id: &str) -> Result<Option<Invoice>, StorageError> {
        let id = parse_invoice_id(id)?;
        let invoices = self.invoices.read().map_err(|_| poisoned())?;

        Ok(invoices.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Invoice>, StorageError> {
        let invoices = self.invoices.read().map_err(|_| poisoned())?;

        let mut all: Vec<Invoice> = invoices.values().cloned().collect();
        all.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }
}

#[async_trait]
impl CustomerDirectory for InMemoryInvoiceStore {
    async fn customers(&self) -> Result<Vec<Customer>, StorageError> {
        let customers = self.customers.read().map_err(|_| poisoned())?;

        let mut all = customers.clone();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }
}
