//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server entry point used by the binary.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::storage::StorageLayer;
use crate::utils::error::{GatewayError, Result};
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    storage: Option<StorageLayer>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use an already initialized storage layer instead of the configured one
    pub fn with_storage(mut self, storage: StorageLayer) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        match self.storage {
            Some(storage) => Ok(HttpServer::with_storage(&config, storage)),
            None => HttpServer::new(&config).await,
        }
    }
}

/// Build a server from `config` and serve until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    let server = ServerBuilder::new().with_config(config).build().await?;
    info!(
        "Server starting at: http://{}:{}",
        server.config().host,
        server.config().port
    );
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /auth/register, /auth/login, /auth/refresh - Accounts");
    info!("   /api/companies - Companies and team members");
    info!("   /api/documents - SAFE notes and term sheets");

    server.start().await
}
