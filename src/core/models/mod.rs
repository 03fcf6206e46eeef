//! Core data models
//!
//! This module defines the data structures shared by the storage layer,
//! the access evaluator and the HTTP routes.

pub mod company;
pub mod document;
pub mod membership;
pub mod user;

// Re-export commonly used types
pub use company::*;
pub use document::*;
pub use membership::*;
pub use user::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Common metadata for all models
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Unique identifier
    pub id: Uuid,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Last update timestamp
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Default for Metadata {
    fn default() -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Metadata {
    /// Create new metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the timestamp
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
    }
}
