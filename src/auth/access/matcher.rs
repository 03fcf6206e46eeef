//! Membership lookups for a caller

use super::lookup::CompanyMembershipLookup;
use crate::core::models::{Company, CompanyMembership, Role};
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Resolves a caller's relationship to a company
///
/// Every call goes to the underlying store; nothing is cached.
#[derive(Clone)]
pub struct RoleMatcher {
    lookup: Arc<dyn CompanyMembershipLookup>,
}

impl std::fmt::Debug for RoleMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleMatcher").finish_non_exhaustive()
    }
}

impl RoleMatcher {
    /// Create a matcher over `lookup`
    pub fn new(lookup: Arc<dyn CompanyMembershipLookup>) -> Self {
        Self { lookup }
    }

    /// Fetch the company, `None` if it does not exist
    pub async fn company(&self, company_id: Uuid) -> Result<Option<Company>> {
        self.lookup.get_company_by_id(company_id).await
    }

    /// Fetch the caller's membership holding any of `roles`
    pub async fn find_membership(
        &self,
        company_id: Uuid,
        user_id: Uuid,
        roles: &[Role],
    ) -> Result<Option<CompanyMembership>> {
        let membership = self
            .lookup
            .get_membership(company_id, user_id, roles)
            .await?;

        debug!(
            %company_id,
            %user_id,
            ?roles,
            found = membership.is_some(),
            "Membership lookup"
        );
        Ok(membership)
    }

    /// Whether the caller holds a membership row with `role`
    pub async fn has_role(&self, company_id: Uuid, user_id: Uuid, role: Role) -> Result<bool> {
        Ok(self
            .find_membership(company_id, user_id, &[role])
            .await?
            .is_some())
    }
}
