//! Persistence operations shared by every storage backend

use crate::auth::access::{CompanyMembershipLookup, DocumentLookup};
use crate::core::models::{Company, CompanyMembership, Document, User};
use crate::utils::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Full read/write access to users, companies, memberships and documents
#[async_trait]
pub trait Store: CompanyMembershipLookup + DocumentLookup + Send + Sync {
    /// Insert a new user, failing with a conflict on a duplicate email
    async fn insert_user(&self, user: &User) -> Result<()>;

    /// Find a user by id
    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>>;

    /// Find a user by email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Record a successful login
    async fn update_user_last_login(&self, user_id: Uuid) -> Result<()>;

    /// Insert a new company
    async fn insert_company(&self, company: &Company) -> Result<()>;

    /// Companies the user owns or is an accepted team member of
    async fn list_companies_for_user(&self, user_id: Uuid) -> Result<Vec<Company>>;

    /// Insert a membership row
    async fn insert_membership(&self, membership: &CompanyMembership) -> Result<()>;

    /// Find a membership row by id
    async fn find_membership_by_id(&self, membership_id: Uuid)
    -> Result<Option<CompanyMembership>>;

    /// All membership rows of a company
    async fn list_memberships(&self, company_id: Uuid) -> Result<Vec<CompanyMembership>>;

    /// Persist permission and invite status changes of a membership
    async fn update_membership(&self, membership: &CompanyMembership) -> Result<()>;

    /// Insert a new document
    async fn insert_document(&self, document: &Document) -> Result<()>;

    /// Persist status and recipient changes of a document
    async fn update_document(&self, document: &Document) -> Result<()>;

    /// Documents issued by a company
    async fn list_documents_sent_by(&self, company_id: Uuid) -> Result<Vec<Document>>;

    /// Documents addressed to a company
    async fn list_documents_received_by(&self, company_id: Uuid) -> Result<Vec<Document>>;

    /// Check that the backend is reachable
    async fn health_check(&self) -> Result<()>;
}
