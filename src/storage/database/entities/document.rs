use crate::core::models::{Document, DocumentKind, DocumentStatus, Metadata};
use crate::utils::error::GatewayError;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Document database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    /// Document ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Document kind (`safe_note` or `term_sheet`)
    pub kind: String,

    /// Lifecycle status
    pub status: String,

    /// Issuing company
    pub sender_company_id: Uuid,

    /// Receiving company
    pub recipient_company_id: Option<Uuid>,

    /// Addressed user
    pub recipient_user_id: Option<Uuid>,

    /// Investment amount in cents
    pub amount_cents: i64,

    /// Valuation cap in cents
    pub valuation_cap_cents: Option<i64>,

    /// Discount in basis points
    pub discount_bps: Option<i32>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Document entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Sender company relation
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::SenderCompanyId",
        to = "super::company::Column::Id",
        on_delete = "Cascade"
    )]
    SenderCompany,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SenderCompany.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to domain document model
    pub fn to_domain_document(&self) -> crate::utils::error::Result<Document> {
        let corrupt =
            |e: String| GatewayError::Internal(format!("Corrupt document row {}: {}", self.id, e));

        Ok(Document {
            metadata: Metadata {
                id: self.id,
                created_at: self.created_at.naive_utc().and_utc(),
                updated_at: self.updated_at.naive_utc().and_utc(),
            },
            kind: self.kind.parse::<DocumentKind>().map_err(corrupt)?,
            status: self.status.parse::<DocumentStatus>().map_err(corrupt)?,
            sender_company_id: self.sender_company_id,
            recipient_company_id: self.recipient_company_id,
            recipient_user_id: self.recipient_user_id,
            amount_cents: self.amount_cents,
            valuation_cap_cents: self.valuation_cap_cents,
            discount_bps: self.discount_bps,
        })
    }

    /// Convert domain document model to SeaORM active model
    pub fn from_domain_document(document: &Document) -> ActiveModel {
        ActiveModel {
            id: Set(document.metadata.id),
            kind: Set(document.kind.to_string()),
            status: Set(document.status.to_string()),
            sender_company_id: Set(document.sender_company_id),
            recipient_company_id: Set(document.recipient_company_id),
            recipient_user_id: Set(document.recipient_user_id),
            amount_cents: Set(document.amount_cents),
            valuation_cap_cents: Set(document.valuation_cap_cents),
            discount_bps: Set(document.discount_bps),
            created_at: Set(document.metadata.created_at.into()),
            updated_at: Set(document.metadata.updated_at.into()),
        }
    }
}
