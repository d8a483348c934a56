//! Raw form input and the state handed back to the form

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw key-value bag submitted by the invoice forms
///
/// Values are kept exactly as posted; coercion happens in the schema.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct FormData(HashMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get a field, `None` when it was not posted at all
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Field error report: form field name → ordered, non-empty list of messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Vec<String>>,
}

impl FieldErrors {
    /// Append a message to a form field (`customerId`, `amount`, `status`, `id`)
    ///
    /// Unknown field names are ignored.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        let slot = match field {
            "customerId" => &mut self.customer_id,
            "amount" => &mut self.amount,
            "status" => &mut self.status,
            "id" => &mut self.id,
            _ => return,
        };
        slot.get_or_insert_with(Vec::new).push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.customer_id.is_none()
            && self.amount.is_none()
            && self.status.is_none()
            && self.id.is_none()
    }

    /// Names of the fields carrying at least one message
    pub fn fields(&self) -> Vec<&'static str> {
        [
            ("customerId", &self.customer_id),
            ("amount", &self.amount),
            ("status", &self.status),
            ("id", &self.id),
        ]
        .into_iter()
        .filter(|(_, messages)| messages.is_some())
        .map(|(name, _)| name)
        .collect()
    }
}

/// State returned to the form on every non-redirecting path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(default)]
    pub message: Option<String>,
}

impl FormState {
    /// Validation failure: field errors plus a general message
    pub fn invalid(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors: Some(errors),
            message: Some(message.into()),
        }
    }

    /// Message-only state
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            errors: None,
            message: Some(message.into()),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }
}
