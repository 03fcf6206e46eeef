//! User account model

use super::Metadata;
use serde::{Deserialize, Serialize};

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User metadata
    #[serde(flatten)]
    pub metadata: Metadata,
    /// Email address (unique)
    pub email: String,
    /// Display name
    pub display_name: Option<String>,
    /// Password hash
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Last login timestamp
    pub last_login_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl User {
    /// Create a new user with an already hashed password
    pub fn new(email: impl Into<String>, display_name: Option<String>, password_hash: String) -> Self {
        Self {
            metadata: Metadata::new(),
            email: email.into(),
            display_name,
            password_hash,
            last_login_at: None,
        }
    }

    /// User ID
    pub fn id(&self) -> uuid::Uuid {
        self.metadata.id
    }
}
