//! Company model

use super::Metadata;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A company registered on the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company metadata
    #[serde(flatten)]
    pub metadata: Metadata,
    /// Legal name
    pub name: String,
    /// User that owns the company
    pub owner_id: Uuid,
}

impl Company {
    /// Create a new company owned by `owner_id`
    pub fn new(name: impl Into<String>, owner_id: Uuid) -> Self {
        Self {
            metadata: Metadata::new(),
            name: name.into(),
            owner_id,
        }
    }

    /// Company ID
    pub fn id(&self) -> Uuid {
        self.metadata.id
    }

    /// Whether `user_id` owns this company
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}
