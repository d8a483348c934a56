//! Field validators used by the invoice schema
//!
//! Each returns a `validator::ValidationError` carrying the message shown
//! next to the form field.

use crate::core::invoice::{Cents, InvoiceStatus};
use std::borrow::Cow;
use validator::ValidationError;

pub const CUSTOMER_REQUIRED: &str = "Please select a customer.";
pub const STATUS_REQUIRED: &str = "Please select an invoice status.";
pub const AMOUNT_NOT_A_NUMBER: &str = "Expected number, received nan";
pub const AMOUNT_NOT_FINITE: &str = "Number must be finite";
pub const AMOUNT_NOT_POSITIVE: &str = "Please enter an amount greater than $0.";
pub const AMOUNT_TOO_LARGE: &str = "Please enter a smaller amount.";
pub const ID_REQUIRED: &str = "Required";

fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Validator: amount must be a finite number worth at least one cent
///
/// The check runs on the rounded cents, so what passes is exactly what gets
/// stored.
pub fn validate_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_nan() {
        return Err(error("invalid_type", AMOUNT_NOT_A_NUMBER));
    }
    if amount.is_infinite() {
        return Err(error("not_finite", AMOUNT_NOT_FINITE));
    }
    if amount <= 0.0 {
        return Err(error("too_small", AMOUNT_NOT_POSITIVE));
    }
    match Cents::from_amount(amount) {
        Some(cents) if cents.value() >= 1 => Ok(()),
        Some(_) => Err(error("too_small", AMOUNT_NOT_POSITIVE)),
        None => Err(error("too_big", AMOUNT_TOO_LARGE)),
    }
}

/// Validator: status must be exactly one of the invoice statuses
pub fn validate_status(status: &str) -> Result<(), ValidationError> {
    match status.parse::<InvoiceStatus>() {
        Ok(_) => Ok(()),
        Err(_) => {
            let expected = InvoiceStatus::ALL
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(" | ");
            Err(error(
                "invalid_enum_value",
                format!(
                    "Invalid enum value. Expected {}, received '{}'",
                    expected, status
                ),
            ))
        }
    }
}
