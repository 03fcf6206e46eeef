use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// User ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Email address (unique)
    #[sea_orm(unique)]
    pub email: String,

    /// Password hash
    pub password_hash: String,

    /// Display name (optional)
    pub display_name: Option<String>,

    /// Last login timestamp
    pub last_login_at: Option<DateTimeWithTimeZone>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// User entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Companies owned by the user
    #[sea_orm(has_many = "super::company::Entity")]
    Companies,

    /// Membership rows of the user
    #[sea_orm(has_many = "super::company_member::Entity")]
    Memberships,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companies.def()
    }
}

impl Related<super::company_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memberships.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to domain user model
    pub fn to_domain_user(&self) -> crate::core::models::User {
        use crate::core::models::Metadata;

        crate::core::models::User {
            metadata: Metadata {
                id: self.id,
                created_at: self.created_at.naive_utc().and_utc(),
                updated_at: self.updated_at.naive_utc().and_utc(),
            },
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            password_hash: self.password_hash.clone(),
            last_login_at: self.last_login_at.map(|dt| dt.naive_utc().and_utc()),
        }
    }

    /// Convert domain user model to SeaORM active model
    pub fn from_domain_user(user: &crate::core::models::User) -> ActiveModel {
        ActiveModel {
            id: Set(user.metadata.id),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            display_name: Set(user.display_name.clone()),
            last_login_at: Set(user.last_login_at.map(|dt| dt.into())),
            created_at: Set(user.metadata.created_at.into()),
            updated_at: Set(user.metadata.updated_at.into()),
        }
    }
}
