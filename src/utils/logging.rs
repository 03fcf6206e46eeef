//! Tracing subscriber setup

use crate::config::LoggingConfig;
use crate::utils::error::{GatewayError, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
///
/// sea-orm and sqlx statement logs are kept at `warn` unless the configured
/// level asks for them explicitly.
pub fn default_filter(config: &LoggingConfig) -> String {
    format!("{},sqlx=warn,sea_orm=warn", config.level.trim())
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(config)))
        .map_err(|e| GatewayError::config(format!("Invalid log filter: {}", e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| GatewayError::internal(format!("Failed to install tracing: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_quiets_sql() {
        let config = LoggingConfig {
            level: " debug ".to_string(),
            json: false,
        };
        assert_eq!(default_filter(&config), "debug,sqlx=warn,sea_orm=warn");
        assert!(EnvFilter::try_new(default_filter(&config)).is_ok());
    }
}
