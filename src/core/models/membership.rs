//! Company membership types
//!
//! A membership row ties one user to one company under one [`Role`]. Only
//! team members carry a [`Permission`] and an [`InviteStatus`].

use super::Metadata;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Relationship of a user to a company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Owner of the company
    Owner,
    /// Invited team member with a permission tier
    TeamMember,
    /// Recipient of a SAFE note sent by the company
    SafeRecipient,
    /// Recipient of a term sheet sent by the company
    TermSheetRecipient,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Owner => write!(f, "owner"),
            Role::TeamMember => write!(f, "team_member"),
            Role::SafeRecipient => write!(f, "safe_recipient"),
            Role::TermSheetRecipient => write!(f, "term_sheet_recipient"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Role::Owner),
            "team_member" => Ok(Role::TeamMember),
            "safe_recipient" => Ok(Role::SafeRecipient),
            "term_sheet_recipient" => Ok(Role::TermSheetRecipient),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Permission tier held by a team member
///
/// Tiers are ordered `View < Edit < Create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Read-only access
    View,
    /// Modify existing records
    Edit,
    /// Create new records
    Create,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Permission::View => write!(f, "view"),
            Permission::Edit => write!(f, "edit"),
            Permission::Create => write!(f, "create"),
        }
    }
}

impl std::str::FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Permission::View),
            "edit" => Ok(Permission::Edit),
            "create" => Ok(Permission::Create),
            _ => Err(format!("Invalid permission: {}", s)),
        }
    }
}

/// Lifecycle of a team invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteStatus {
    /// Invitation sent, no answer yet
    Pending,
    /// Invitation accepted
    Accepted,
    /// Invitation declined
    Declined,
}

impl std::fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InviteStatus::Pending => write!(f, "pending"),
            InviteStatus::Accepted => write!(f, "accepted"),
            InviteStatus::Declined => write!(f, "declined"),
        }
    }
}

impl std::str::FromStr for InviteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InviteStatus::Pending),
            "accepted" => Ok(InviteStatus::Accepted),
            "declined" => Ok(InviteStatus::Declined),
            _ => Err(format!("Invalid invite status: {}", s)),
        }
    }
}

/// One user's relationship to one company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyMembership {
    /// Membership metadata
    #[serde(flatten)]
    pub metadata: Metadata,
    /// Company ID
    pub company_id: Uuid,
    /// User ID
    pub user_id: Uuid,
    /// Role held through this row
    pub role: Role,
    /// Permission tier (team members only)
    pub permission: Option<Permission>,
    /// Invitation status (team members only)
    pub invite_status: Option<InviteStatus>,
}

impl CompanyMembership {
    /// Create a pending team member invitation
    pub fn invite(company_id: Uuid, user_id: Uuid, permission: Permission) -> Self {
        Self {
            metadata: Metadata::new(),
            company_id,
            user_id,
            role: Role::TeamMember,
            permission: Some(permission),
            invite_status: Some(InviteStatus::Pending),
        }
    }

    /// Create a recipient row for a document sent by the company
    pub fn recipient(company_id: Uuid, user_id: Uuid, role: Role) -> Self {
        Self {
            metadata: Metadata::new(),
            company_id,
            user_id,
            role,
            permission: None,
            invite_status: None,
        }
    }

    /// Whether this is a team membership that was explicitly declined
    pub fn is_declined(&self) -> bool {
        self.invite_status == Some(InviteStatus::Declined)
    }

    /// Whether this is a team membership that was accepted
    pub fn is_accepted(&self) -> bool {
        self.invite_status == Some(InviteStatus::Accepted)
    }
}
