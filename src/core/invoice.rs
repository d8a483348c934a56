//! Invoice and customer records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    /// Every accepted status, in form order
    pub const ALL: [InvoiceStatus; 2] = [InvoiceStatus::Pending, InvoiceStatus::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    /// Exact, case-sensitive match
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(format!("unknown invoice status '{}'", other)),
        }
    }
}

/// Amount expressed in integer minor units (cents)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl Cents {
    /// Largest storable amount: every cent up to 2^53 - 1 is exact in an `f64`
    pub const MAX: Cents = Cents(9_007_199_254_740_991);

    /// Convert a decimal amount to cents, rounding half away from zero
    ///
    /// Returns `None` for non-finite amounts and for amounts beyond
    /// [`Cents::MAX`] in either direction.
    pub fn from_amount(amount: f64) -> Option<Self> {
        let cents = (amount * 100.0).round();
        if cents.is_finite() && cents.abs() <= Self::MAX.0 as f64 {
            Some(Cents(cents as i64))
        } else {
            None
        }
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// A stored invoice row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub customer_id: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Values written by the create handler
///
/// The store assigns the identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Values written by the update handler; `date` is deliberately absent
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceChanges {
    pub customer_id: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
}

/// Read-only customer record, used to populate the invoice forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_exact() {
        assert_eq!("pending".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Pending));
        assert_eq!("paid".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Paid));
        assert!("Paid".parse::<InvoiceStatus>().is_err());
        assert!(" paid".parse::<InvoiceStatus>().is_err());
        assert!("overdue".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&InvoiceStatus::Paid).unwrap();
        assert_eq!(json, "\"paid\"");
    }

    #[test]
    fn test_cents_rounds_float_error() {
        // 19.99 * 100 = 1998.9999999999998 in binary floating point
        assert_eq!(Cents::from_amount(19.99), Some(Cents(1999)));
        assert_eq!(Cents::from_amount(12.5), Some(Cents(1250)));
        assert_eq!(Cents::from_amount(0.005), Some(Cents(1)));
    }

    #[test]
    fn test_cents_sub_cent_amount_rounds_to_zero() {
        assert_eq!(Cents::from_amount(0.004), Some(Cents(0)));
    }

    #[test]
    fn test_cents_out_of_range_is_none() {
        assert_eq!(Cents::from_amount(1e300), None);
        assert_eq!(Cents::from_amount(-1e300), None);
        assert_eq!(Cents::from_amount(f64::INFINITY), None);
        assert_eq!(Cents::from_amount(f64::NAN), None);
    }

    #[test]
    fn test_cents_large_in_range_amount() {
        assert_eq!(Cents::from_amount(1e13), Some(Cents(1_000_000_000_000_000)));
    }
}
