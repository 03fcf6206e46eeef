//! Storage layer for the server
//!
//! This module provides data persistence for users, companies, memberships
//! and documents, backed either by a SeaORM database or by process memory.

/// Database storage module
pub mod database;
/// In-memory storage module
pub mod memory;
/// Backend-independent store trait
pub mod store;

pub use memory::MemoryStore;
pub use store::Store;

use crate::auth::access::{CompanyMembershipLookup, DocumentLookup};
use crate::config::StorageConfig;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Which backend serves the storage layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process memory, lost on restart
    Memory,
    /// SeaORM database
    Database(database::DatabaseBackendType),
}

/// Main storage layer handing out the store and its lookup views
#[derive(Clone)]
pub struct StorageLayer {
    store: Arc<dyn Store>,
    lookup: Arc<dyn CompanyMembershipLookup>,
    documents: Arc<dyn DocumentLookup>,
    backend: StorageBackend,
}

impl std::fmt::Debug for StorageLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageLayer")
            .field("backend", &self.backend)
            .finish()
    }
}

impl StorageLayer {
    /// Create a new storage layer
    ///
    /// Connects and migrates the database when it is enabled, otherwise
    /// falls back to an in-memory store.
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        info!("Initializing storage layer");

        if !config.database.enabled {
            warn!("Database disabled, using in-memory storage; data will not survive a restart");
            return Ok(Self::in_memory());
        }

        debug!("Connecting to database");
        let database = database::Database::new(&config.database).await?;
        database.migrate().await?;
        let backend = StorageBackend::Database(database.backend_type());

        info!("Storage layer initialized successfully");
        Ok(Self::from_backend(Arc::new(database), backend))
    }

    /// Create a storage layer over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::from_backend(Arc::new(MemoryStore::new()), StorageBackend::Memory)
    }

    /// Wrap an existing store
    pub fn from_backend<T>(store: Arc<T>, backend: StorageBackend) -> Self
    where
        T: Store + 'static,
    {
        Self {
            store: store.clone(),
            lookup: store.clone(),
            documents: store,
            backend,
        }
    }

    /// Full read/write store
    pub fn store(&self) -> Arc<dyn Store> {
        self.store.clone()
    }

    /// Company and membership lookup used by the access evaluator
    pub fn lookup(&self) -> Arc<dyn CompanyMembershipLookup> {
        self.lookup.clone()
    }

    /// Document lookup used to resolve document-scoped routes
    pub fn documents(&self) -> Arc<dyn DocumentLookup> {
        self.documents.clone()
    }

    /// Active backend
    pub fn backend(&self) -> StorageBackend {
        self.backend
    }

    /// Health check for the active backend
    pub async fn health_check(&self) -> Result<StorageHealthStatus> {
        let database = match self.store.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Storage health check failed: {}", e);
                false
            }
        };

        Ok(StorageHealthStatus {
            backend: match self.backend {
                StorageBackend::Memory => "memory",
                StorageBackend::Database(database::DatabaseBackendType::SQLite) => "sqlite",
                StorageBackend::Database(database::DatabaseBackendType::PostgreSQL) => "postgres",
            },
            database,
            overall: database,
        })
    }
}

/// Storage health status
#[derive(Debug, Clone, serde::Serialize)]
pub struct StorageHealthStatus {
    /// Active backend name
    pub backend: &'static str,
    /// Backend reachable
    pub database: bool,
    /// Overall health status
    pub overall: bool,
}
