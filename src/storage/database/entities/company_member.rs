use crate::core::models::{CompanyMembership, InviteStatus, Metadata, Permission, Role};
use crate::utils::error::GatewayError;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Company membership database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "company_members")]
pub struct Model {
    /// Membership ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Company ID
    pub company_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role name
    pub role: String,

    /// Permission tier (team members only)
    pub permission: Option<String>,

    /// Invitation status (team members only)
    pub invite_status: Option<String>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Company member entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Company relation
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id",
        on_delete = "Cascade"
    )]
    Company,

    /// User relation
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to domain membership model
    ///
    /// Fails when a stored enum column holds an unknown value.
    pub fn to_domain_membership(&self) -> crate::utils::error::Result<CompanyMembership> {
        let corrupt =
            |e: String| GatewayError::Internal(format!("Corrupt membership row {}: {}", self.id, e));

        Ok(CompanyMembership {
            metadata: Metadata {
                id: self.id,
                created_at: self.created_at.naive_utc().and_utc(),
                updated_at: self.updated_at.naive_utc().and_utc(),
            },
            company_id: self.company_id,
            user_id: self.user_id,
            role: Role::from_str(&self.role).map_err(corrupt)?,
            permission: self
                .permission
                .as_deref()
                .map(str::parse::<Permission>)
                .transpose()
                .map_err(corrupt)?,
            invite_status: self
                .invite_status
                .as_deref()
                .map(str::parse::<InviteStatus>)
                .transpose()
                .map_err(corrupt)?,
        })
    }

    /// Convert domain membership model to SeaORM active model
    pub fn from_domain_membership(membership: &CompanyMembership) -> ActiveModel {
        ActiveModel {
            id: Set(membership.metadata.id),
            company_id: Set(membership.company_id),
            user_id: Set(membership.user_id),
            role: Set(membership.role.to_string()),
            permission: Set(membership.permission.map(|p| p.to_string())),
            invite_status: Set(membership.invite_status.map(|s| s.to_string())),
            created_at: Set(membership.metadata.created_at.into()),
            updated_at: Set(membership.metadata.updated_at.into()),
        }
    }
}
