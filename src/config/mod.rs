//! Configuration loading and management

use crate::core::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listener binds to
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Database settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL (`postgres://...`); without one the in-memory store is used
    pub url: Option<String>,

    pub max_connections: u32,

    /// How long a statement may wait for a pooled connection
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
            acquire_timeout_secs: 5,
        }
    }
}

/// Invoice form settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoicesConfig {
    /// The invoices list view: invalidated and navigated to after a mutation
    pub list_path: String,

    /// Let the delete form actually remove rows
    ///
    /// Off by default: the delete handler then always fails with a fatal error.
    pub allow_delete: bool,
}

impl Default for InvoicesConfig {
    fn default() -> Self {
        Self {
            list_path: "/dashboard/invoices".to_string(),
            allow_delete: false,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub invoices: InvoicesConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        if !Path::new(path).exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: e.to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load the effective configuration
    ///
    /// Reads `path` when given (defaults otherwise), lets `DATABASE_URL`
    /// override `database.url`, then validates the result.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.trim().is_empty() {
                config.database.url = Some(url);
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "server.bind".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        let list_path = &self.invoices.list_path;
        if !list_path.starts_with('/') || list_path.trim_end_matches('/').is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "invoices.list_path".to_string(),
                message: format!("'{}' must be an absolute path below '/'", list_path),
            });
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "database.max_connections".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.invoices.list_path, "/dashboard/invoices");
        assert!(!config.invoices.allow_delete);
        assert!(config.database.url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml_str(
            r#"
invoices:
  allow_delete: true
"#,
        )
        .unwrap();
        assert!(config.invoices.allow_delete);
        assert_eq!(config.invoices.list_path, "/dashboard/invoices");
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_yaml_serialization() {
        let config = AppConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = AppConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = AppConfig::from_yaml_str("server: [").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::from_yaml_file("/nonexistent/invoice-forms.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_validate_rejects_relative_list_path() {
        let mut config = AppConfig::default();
        config.invoices.list_path = "dashboard/invoices".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("invoices.list_path"));
    }

    #[test]
    fn test_validate_rejects_empty_pool() {
        let mut config = AppConfig::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());
    }
}
