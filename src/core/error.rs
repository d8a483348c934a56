//! Typed error handling for invoice form processing
//!
//! Three kinds of failure exist and each has its own type:
//!
//! - Field validation failures are not errors at all: they are reported back to
//!   the caller as a [`FormState`](crate::core::form::FormState).
//! - [`StorageError`]: the persistence store failed. Handlers log the cause and
//!   reduce it to a generic message, so the variant never reaches HTTP clients
//!   with its details.
//! - [`FormsError`]: everything that terminates a request instead of producing
//!   a state (fatal handler faults, unknown records on read routes, storage
//!   errors outside of a mutation handler).
//! - [`ConfigError`]: startup only; the binary reports it through `anyhow`.
//!
//! # Example
//!
//! ```rust,ignore
//! match actions.delete_invoice(&id).await {
//!     Ok(state) => println!("{:?}", state.message),
//!     Err(FormsError::Fatal { message }) => eprintln!("request aborted: {}", message),
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type of the crate
#[derive(Debug, Error)]
pub enum FormsError {
    /// Unrecoverable fault raised by a handler; the request is aborted
    #[error("{message}")]
    Fatal { message: String },

    /// A record looked up by a read route does not exist
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: String },

    /// Storage backend errors outside of a mutation handler
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl FormsError {
    /// Shorthand for a fatal fault
    pub fn fatal(message: impl Into<String>) -> Self {
        FormsError::Fatal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            FormsError::Fatal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            FormsError::NotFound { .. } => StatusCode::NOT_FOUND,
            FormsError::Storage(e) => e.status_code(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            FormsError::Fatal { .. } => "FATAL_ERROR",
            FormsError::NotFound { .. } => "NOT_FOUND",
            FormsError::Storage(e) => e.error_code(),
        }
    }

    /// Convert to an error response
    ///
    /// Storage causes are replaced by a generic message; they are only meant
    /// for the logs.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            FormsError::Storage(_) => "Database Error".to_string(),
            other => other.to_string(),
        };
        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            FormsError::NotFound { entity_type, id } => Some(serde_json::json!({
                "entity_type": entity_type,
                "id": id,
            })),
            _ => None,
        }
    }
}

impl IntoResponse for FormsError {
    fn into_response(self) -> Response {
        if let FormsError::Storage(ref cause) = self {
            tracing::error!(error = %cause, "storage failure while serving request");
        }
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by invoice stores
#[derive(Debug, Error)]
pub enum StorageError {
    /// Could not reach the backend
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    /// A statement was rejected or failed while executing
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// An identifier could not be interpreted by the backend
    #[error("Invalid identifier '{value}'")]
    InvalidIdentifier { value: String },

    /// Backend not available (closed, poisoned, injected failure...)
    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

impl StorageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::ConnectionError { .. } => "STORAGE_CONNECTION_ERROR",
            StorageError::QueryError { .. } => "STORAGE_QUERY_ERROR",
            StorageError::InvalidIdentifier { .. } => "STORAGE_INVALID_IDENTIFIER",
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE",
        }
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        let backend = "PostgreSQL".to_string();
        let message = err.to_string();
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StorageError::ConnectionError { backend, message }
            }
            _ => StorageError::QueryError { backend, message },
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration loading and validation
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration{}: {message}", in_file(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// A key holds an unusable value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// IO error while reading configuration
    #[error("IO error reading configuration: {message}")]
    IoError { message: String },
}

fn in_file(file: &Option<String>) -> String {
    file.as_ref().map(|f| format!(" '{}'", f)).unwrap_or_default()
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

/// A specialized Result type for crate operations
pub type FormsResult<T> = Result<T, FormsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_error_display_and_status() {
        let err = FormsError::fatal("Failed to Delete Invoice");
        assert_eq!(err.to_string(), "Failed to Delete Invoice");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "FATAL_ERROR");
    }

    #[test]
    fn test_not_found_response_has_details() {
        let err = FormsError::NotFound {
            entity_type: "invoice".to_string(),
            id: "abc".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        let response = err.to_response();
        assert_eq!(response.code, "NOT_FOUND");
        assert!(response.details.is_some());
    }

    #[test]
    fn test_storage_cause_hidden_from_response() {
        let err: FormsError = StorageError::QueryError {
            backend: "PostgreSQL".to_string(),
            message: "relation \"invoices\" does not exist".to_string(),
        }
        .into();
        let response = err.to_response();
        assert_eq!(response.code, "STORAGE_QUERY_ERROR");
        assert!(!response.message.contains("relation"));
    }

    #[test]
    fn test_storage_error_display_keeps_cause() {
        let err = StorageError::ConnectionError {
            backend: "PostgreSQL".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("PostgreSQL"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_config_parse_error_mentions_file() {
        let err = ConfigError::ParseError {
            file: Some("app.yaml".to_string()),
            message: "invalid syntax".to_string(),
        };
        assert!(err.to_string().contains("'app.yaml'"));

        let err = ConfigError::ParseError {
            file: None,
            message: "invalid syntax".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse configuration: invalid syntax"
        );
    }

    #[test]
    fn test_from_serde_yaml_error() {
        let yaml_err = serde_yaml::from_str::<Vec<u32>>("{ not: a list").unwrap_err();
        let err: ConfigError = yaml_err.into();
        assert!(matches!(err, ConfigError::ParseError { file: None, .. }));
    }
}
