//! Integration tests for InMemoryInvoiceStore using the store test harness.

#[macro_use]
mod store_harness;

use invoice_forms::storage::InMemoryInvoiceStore;
use store_harness::*;

invoice_store_tests!(InMemoryInvoiceStore::new());
