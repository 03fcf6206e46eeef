//! Company-scoped access control
//!
//! Decides whether a caller may act on a company (or on a document issued by
//! it) from three facts: the caller's role in the company, a team member's
//! invite status, and a team member's permission tier.
//!
//! - [`PermissionHierarchy`] expands a held permission to the tier below it.
//! - [`RoleMatcher`] fetches membership rows through a
//!   [`CompanyMembershipLookup`].
//! - [`AccessEvaluator`] combines both into an allow/deny decision.

mod evaluator;
mod hierarchy;
mod lookup;
mod matcher;

pub use evaluator::{AccessDecision, AccessEvaluator, AccessReason, AccessRequest};
pub use hierarchy::PermissionHierarchy;
pub use lookup::{CompanyMembershipLookup, DocumentLookup};
#[cfg(test)]
pub use lookup::{MockCompanyMembershipLookup, MockDocumentLookup};
pub use matcher::RoleMatcher;
