use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Company database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    /// Company ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Legal name
    pub name: String,

    /// Owning user
    pub owner_id: Uuid,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Company entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owner relation
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,

    /// Membership rows of the company
    #[sea_orm(has_many = "super::company_member::Entity")]
    Members,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::company_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to domain company model
    pub fn to_domain_company(&self) -> crate::core::models::Company {
        use crate::core::models::Metadata;

        crate::core::models::Company {
            metadata: Metadata {
                id: self.id,
                created_at: self.created_at.naive_utc().and_utc(),
                updated_at: self.updated_at.naive_utc().and_utc(),
            },
            name: self.name.clone(),
            owner_id: self.owner_id,
        }
    }

    /// Convert domain company model to SeaORM active model
    pub fn from_domain_company(company: &crate::core::models::Company) -> ActiveModel {
        ActiveModel {
            id: Set(company.metadata.id),
            name: Set(company.name.clone()),
            owner_id: Set(company.owner_id),
            created_at: Set(company.metadata.created_at.into()),
            updated_at: Set(company.metadata.updated_at.into()),
        }
    }
}
