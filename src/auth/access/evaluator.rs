//! Allow/deny decision for company-scoped requests

use super::hierarchy::PermissionHierarchy;
use super::lookup::CompanyMembershipLookup;
use super::matcher::RoleMatcher;
use crate::core::models::{Permission, Role};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Input of one access evaluation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessRequest {
    /// Company the request acts on, `None` when not company-scoped
    pub company_id: Option<Uuid>,
    /// Authenticated caller
    pub user_id: Uuid,
    /// Roles accepted by the route, empty means any non-declined user
    pub required_roles: Vec<Role>,
    /// Permissions accepted from team members, empty means the role suffices
    pub required_permissions: Vec<Permission>,
}

/// Branch of the evaluation that produced the decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessReason {
    /// No company named by the request
    NotCompanyScoped,
    /// Named company does not exist; handlers report the 404
    CompanyNotFound,
    /// No role required and the caller is not a declined team member
    NoRoleRequired,
    /// No role required but the caller declined the team invitation
    InviteDeclined,
    /// Caller owns the company
    Owner,
    /// Caller received a SAFE note from the company
    SafeRecipient,
    /// Caller received a term sheet from the company
    TermSheetRecipient,
    /// Accepted team member with a sufficient permission
    TeamMember,
    /// Team member whose invitation is not accepted
    InviteNotAccepted,
    /// Accepted team member lacking the required permission
    InsufficientPermission,
    /// No accepted role matched
    NoMatchingRole,
}

/// Outcome of an access evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Whether access is granted
    pub granted: bool,
    /// Branch that decided
    pub reason: AccessReason,
}

impl AccessDecision {
    fn allow(reason: AccessReason) -> Self {
        Self {
            granted: true,
            reason,
        }
    }

    fn deny(reason: AccessReason) -> Self {
        Self {
            granted: false,
            reason,
        }
    }
}

/// Company access evaluator
///
/// Stateless apart from the injected store; safe to share across requests.
#[derive(Debug, Clone)]
pub struct AccessEvaluator {
    matcher: RoleMatcher,
}

impl AccessEvaluator {
    /// Create an evaluator reading from `lookup`
    pub fn new(lookup: Arc<dyn CompanyMembershipLookup>) -> Self {
        Self {
            matcher: RoleMatcher::new(lookup),
        }
    }

    /// Decide whether the caller may proceed
    pub async fn evaluate(
        &self,
        company_id: Option<Uuid>,
        user_id: Uuid,
        required_roles: &[Role],
        required_permissions: &[Permission],
    ) -> Result<bool> {
        let decision = self
            .decide(company_id, user_id, required_roles, required_permissions)
            .await?;
        Ok(decision.granted)
    }

    /// Evaluate an [`AccessRequest`], keeping the deciding branch
    pub async fn check(&self, request: &AccessRequest) -> Result<AccessDecision> {
        self.decide(
            request.company_id,
            request.user_id,
            &request.required_roles,
            &request.required_permissions,
        )
        .await
    }

    async fn decide(
        &self,
        company_id: Option<Uuid>,
        user_id: Uuid,
        required_roles: &[Role],
        required_permissions: &[Permission],
    ) -> Result<AccessDecision> {
        let Some(company_id) = company_id else {
            return Ok(AccessDecision::allow(AccessReason::NotCompanyScoped));
        };

        let Some(company) = self.matcher.company(company_id).await? else {
            debug!(%company_id, "Company not found, leaving 404 to the handler");
            return Ok(AccessDecision::allow(AccessReason::CompanyNotFound));
        };

        if required_roles.is_empty() {
            let team = self
                .matcher
                .find_membership(company_id, user_id, &[Role::TeamMember])
                .await?;

            // Only an explicit decline blocks an unscoped check.
            return Ok(match team {
                Some(membership) if membership.is_declined() => {
                    AccessDecision::deny(AccessReason::InviteDeclined)
                }
                _ => AccessDecision::allow(AccessReason::NoRoleRequired),
            });
        }

        if required_roles.contains(&Role::Owner) && company.is_owned_by(user_id) {
            return Ok(AccessDecision::allow(AccessReason::Owner));
        }

        if required_roles.contains(&Role::SafeRecipient)
            && self
                .matcher
                .has_role(company_id, user_id, Role::SafeRecipient)
                .await?
        {
            return Ok(AccessDecision::allow(AccessReason::SafeRecipient));
        }

        if required_roles.contains(&Role::TermSheetRecipient)
            && self
                .matcher
                .has_role(company_id, user_id, Role::TermSheetRecipient)
                .await?
        {
            return Ok(AccessDecision::allow(AccessReason::TermSheetRecipient));
        }

        if required_roles.contains(&Role::TeamMember) {
            let team = self
                .matcher
                .find_membership(company_id, user_id, &[Role::TeamMember])
                .await?;

            if let Some(membership) = team.filter(|m| m.user_id == user_id) {
                if !membership.is_accepted() {
                    return Ok(AccessDecision::deny(AccessReason::InviteNotAccepted));
                }

                return Ok(
                    if PermissionHierarchy::satisfies(membership.permission, required_permissions)
                    {
                        AccessDecision::allow(AccessReason::TeamMember)
                    } else {
                        AccessDecision::deny(AccessReason::InsufficientPermission)
                    },
                );
            }
        }

        Ok(AccessDecision::deny(AccessReason::NoMatchingRole))
    }
}
