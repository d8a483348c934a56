//! Shared contract tests for `InvoiceStore` backends.
//!
//! Each backend test file invokes `invoice_store_tests!` with an expression
//! producing a fresh, empty store.

pub mod invoice_store_tests;

use chrono::NaiveDate;
use invoice_forms::prelude::*;

/// A fresh customer reference
pub fn customer_id() -> String {
    format!("customer-{}", Uuid::new_v4())
}

pub fn new_invoice(customer_id: &str, cents: i64, date: NaiveDate) -> NewInvoice {
    NewInvoice {
        customer_id: customer_id.to_string(),
        amount: Cents(cents),
        status: InvoiceStatus::Pending,
        date,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
