//! Storage configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Maximum connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
    /// Enable database (if false, use in-memory storage)
    #[serde(default)]
    pub enabled: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            connection_timeout: default_connection_timeout(),
            enabled: false,
        }
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }

        if self.url.is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }

        let supported = ["sqlite:", "postgres://", "postgresql://"];
        if !supported.iter().any(|scheme| self.url.starts_with(scheme)) {
            return Err(format!("Unsupported database URL: {}", self.url));
        }

        if self.max_connections == 0 {
            return Err("Database max connections cannot be 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.connection_timeout, 5);
        assert!(!config.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_config_deserialization() {
        let json = r#"{"url": "postgresql://prod/safenote", "max_connections": 50, "enabled": true}"#;
        let config: DatabaseConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.url, "postgresql://prod/safenote");
        assert_eq!(config.connection_timeout, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_config_rejects_unknown_scheme() {
        let config = DatabaseConfig {
            url: "mysql://localhost/safenote".to_string(),
            enabled: true,
            ..DatabaseConfig::default()
        };
        assert!(config.validate().unwrap_err().contains("Unsupported"));
    }

    #[test]
    fn test_disabled_database_skips_validation() {
        let config = DatabaseConfig {
            url: String::new(),
            enabled: false,
            ..DatabaseConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
