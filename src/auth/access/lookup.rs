//! Data-access seams used by the access evaluator and route guard

use crate::core::models::{Company, CompanyMembership, Document, Role};
use crate::utils::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Read access to companies and their membership rows
///
/// A missing row is `Ok(None)`. Store failures are returned as `Err` and
/// must not be mapped to a default answer by callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyMembershipLookup: Send + Sync {
    /// Fetch a company by id
    async fn get_company_by_id(&self, company_id: Uuid) -> Result<Option<Company>>;

    /// Fetch the membership of `user_id` in `company_id` holding any of `roles`
    async fn get_membership(
        &self,
        company_id: Uuid,
        user_id: Uuid,
        roles: &[Role],
    ) -> Result<Option<CompanyMembership>>;
}

/// Read access to documents, used to scope document routes to their sender
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentLookup: Send + Sync {
    /// Fetch a document by id
    async fn get_document(&self, document_id: Uuid) -> Result<Option<Document>>;
}
