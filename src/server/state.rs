//! Application state shared across HTTP handlers

use crate::auth::AuthSystem;
use crate::auth::access::AccessEvaluator;
use crate::config::Config;
use crate::storage::StorageLayer;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for cheap sharing across workers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server configuration (shared read-only)
    pub config: Arc<Config>,
    /// Authentication system
    pub auth: Arc<AuthSystem>,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
    /// Company access evaluator
    pub evaluator: Arc<AccessEvaluator>,
}

impl AppState {
    /// Wire the auth system and evaluator to `storage`
    pub fn new(config: Config, storage: StorageLayer) -> Self {
        let auth = AuthSystem::new(config.auth(), storage.store());
        let evaluator = AccessEvaluator::new(storage.lookup());

        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            storage: Arc::new(storage),
            evaluator: Arc::new(evaluator),
        }
    }

    /// Get server configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
