//! Invoice form schema
//!
//! Two variants share the same rules: the create form (no `id`, no `date`)
//! and the update form (with `id`, no `date`). Both return a tagged result,
//! never panic.

use super::filters::{coerce_number, trimmed};
use super::validators::{
    AMOUNT_TOO_LARGE, CUSTOMER_REQUIRED, ID_REQUIRED, STATUS_REQUIRED, validate_amount,
    validate_status,
};
use crate::core::form::{FieldErrors, FormData};
use crate::core::invoice::{Cents, InvoiceStatus};
use validator::{Validate, ValidationErrors};

/// Validated create-form values
#[derive(Debug, Clone, PartialEq)]
pub struct CreateInvoice {
    pub customer_id: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
}

/// Validated update-form values
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateInvoice {
    pub id: String,
    pub customer_id: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
}

#[derive(Debug, Validate)]
struct InvoiceFields {
    #[validate(required(message = "Please select a customer."))]
    customer_id: Option<String>,
    #[validate(custom(function = "validate_amount"))]
    amount: f64,
    #[validate(
        required(message = "Please select an invoice status."),
        custom(function = "validate_status")
    )]
    status: Option<String>,
}

#[derive(Debug, Validate)]
struct UpdateFields {
    #[validate(required(message = "Required"))]
    id: Option<String>,
    #[validate(nested)]
    fields: InvoiceFields,
}

impl InvoiceFields {
    fn from_form(form: &FormData) -> Self {
        Self {
            customer_id: trimmed(form.get("customerId")),
            amount: coerce_number(form.get("amount")),
            status: form.get("status").map(str::to_string),
        }
    }

    fn into_parts(self, errors: &mut FieldErrors) -> Option<(String, Cents, InvoiceStatus)> {
        let customer_id = self.customer_id;
        if customer_id.is_none() {
            errors.push("customerId", CUSTOMER_REQUIRED);
        }
        let amount = Cents::from_amount(self.amount);
        if amount.is_none() {
            errors.push("amount", AMOUNT_TOO_LARGE);
        }
        let status = match self.status.as_deref().map(str::parse::<InvoiceStatus>) {
            Some(Ok(status)) => Some(status),
            _ => {
                errors.push("status", STATUS_REQUIRED);
                None
            }
        };
        Some((customer_id?, amount?, status?))
    }
}

/// Validate the create form
pub fn parse_create(form: &FormData) -> Result<CreateInvoice, FieldErrors> {
    let fields = InvoiceFields::from_form(form);
    fields.validate().map_err(|report| to_field_errors(&report))?;

    let mut errors = FieldErrors::default();
    match fields.into_parts(&mut errors) {
        Some((customer_id, amount, status)) => Ok(CreateInvoice {
            customer_id,
            amount,
            status,
        }),
        None => Err(errors),
    }
}

/// Validate the update form; `id` is passed through untouched
pub fn parse_update(form: &FormData) -> Result<UpdateInvoice, FieldErrors> {
    let input = UpdateFields {
        id: form.get("id").map(str::to_string),
        fields: InvoiceFields::from_form(form),
    };
    input.validate().map_err(|report| to_field_errors(&report))?;

    let mut errors = FieldErrors::default();
    let parts = input.fields.into_parts(&mut errors);
    match (input.id, parts) {
        (Some(id), Some((customer_id, amount, status))) => Ok(UpdateInvoice {
            id,
            customer_id,
            amount,
            status,
        }),
        (None, _) => {
            errors.push("id", ID_REQUIRED);
            Err(errors)
        }
        _ => Err(errors),
    }
}

/// Flatten a `validator` report into the per-field message lists of the form
fn to_field_errors(report: &ValidationErrors) -> FieldErrors {
    let mut errors = FieldErrors::default();
    collect(report, &mut errors);
    errors
}

fn collect(report: &ValidationErrors, errors: &mut FieldErrors) {
    for (field, kind) in report.errors() {
        let name: &str = field.as_ref();
        match kind {
            validator::ValidationErrorsKind::Field(list) => {
                for err in list {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    errors.push(form_field_name(name), message);
                }
            }
            validator::ValidationErrorsKind::Struct(nested) => collect(nested, errors),
            validator::ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect(nested, errors);
                }
            }
        }
    }
}

fn form_field_name(field: &str) -> &str {
    match field {
        "customer_id" => "customerId",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::validators::AMOUNT_NOT_POSITIVE;

    fn valid_form() -> FormData {
        FormData::new()
            .with("customerId", "c1")
            .with("amount", "12.50")
            .with("status", "pending")
    }

    #[test]
    fn test_create_valid_form() {
        let parsed = parse_create(&valid_form()).unwrap();
        assert_eq!(
            parsed,
            CreateInvoice {
                customer_id: "c1".to_string(),
                amount: Cents(1250),
                status: InvoiceStatus::Pending,
            }
        );
    }

    #[test]
    fn test_create_ignores_extra_fields() {
        let form = valid_form().with("id", "ignored").with("date", "1999-01-01");
        assert!(parse_create(&form).is_ok());
    }

    #[test]
    fn test_create_zero_amount() {
        let errors = parse_create(&valid_form().with("amount", "0")).unwrap_err();
        assert_eq!(errors.amount, Some(vec![AMOUNT_NOT_POSITIVE.to_string()]));
        assert_eq!(errors.fields(), vec!["amount"]);
    }

    #[test]
    fn test_create_sub_cent_amount() {
        let errors = parse_create(&valid_form().with("amount", "0.001")).unwrap_err();
        assert_eq!(errors.amount, Some(vec![AMOUNT_NOT_POSITIVE.to_string()]));
    }

    #[test]
    fn test_create_unstorable_amount() {
        let errors = parse_create(&valid_form().with("amount", "1e300")).unwrap_err();
        assert_eq!(errors.amount, Some(vec![AMOUNT_TOO_LARGE.to_string()]));
    }

    #[test]
    fn test_create_missing_amount_coerces_to_zero() {
        let form = FormData::new()
            .with("customerId", "c1")
            .with("status", "paid");
        let errors = parse_create(&form).unwrap_err();
        assert_eq!(errors.amount, Some(vec![AMOUNT_NOT_POSITIVE.to_string()]));
    }

    #[test]
    fn test_create_non_numeric_amount() {
        let errors = parse_create(&valid_form().with("amount", "twelve")).unwrap_err();
        assert_eq!(
            errors.amount,
            Some(vec!["Expected number, received nan".to_string()])
        );
    }

    #[test]
    fn test_create_invalid_status() {
        let errors = parse_create(&valid_form().with("status", "overdue")).unwrap_err();
        let messages = errors.status.unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("'overdue'"));
    }

    #[test]
    fn test_create_missing_status() {
        let form = FormData::new()
            .with("customerId", "c1")
            .with("amount", "5");
        let errors = parse_create(&form).unwrap_err();
        assert_eq!(errors.status, Some(vec![STATUS_REQUIRED.to_string()]));
    }

    #[test]
    fn test_create_blank_customer() {
        let errors = parse_create(&valid_form().with("customerId", "  ")).unwrap_err();
        assert_eq!(errors.customer_id, Some(vec![CUSTOMER_REQUIRED.to_string()]));
    }

    #[test]
    fn test_create_empty_form_reports_every_field() {
        let errors = parse_create(&FormData::new()).unwrap_err();
        assert_eq!(errors.fields(), vec!["customerId", "amount", "status"]);
    }

    #[test]
    fn test_update_valid_form() {
        let parsed = parse_update(&valid_form().with("id", "inv-1")).unwrap();
        assert_eq!(parsed.id, "inv-1");
        assert_eq!(parsed.status, InvoiceStatus::Pending);
    }

    #[test]
    fn test_update_missing_id() {
        let errors = parse_update(&valid_form()).unwrap_err();
        assert_eq!(errors.id, Some(vec![ID_REQUIRED.to_string()]));
        assert_eq!(errors.fields(), vec!["id"]);
    }

    #[test]
    fn test_update_reports_nested_field_errors() {
        let form = valid_form().with("id", "inv-1").with("amount", "-1");
        let errors = parse_update(&form).unwrap_err();
        assert_eq!(errors.amount, Some(vec![AMOUNT_NOT_POSITIVE.to_string()]));
    }
}
