use crate::core::models::Document;
use crate::utils::error::{GatewayError, Result};
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, document};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Find document by ID
    pub async fn find_document_by_id(&self, document_id: Uuid) -> Result<Option<Document>> {
        debug!("Finding document by ID: {}", document_id);

        let model = entities::Document::find_by_id(document_id)
            .one(&self.db)
            .await
            .map_err(GatewayError::Database)?;

        model.map(|m| m.to_domain_document()).transpose()
    }

    /// Create a new document
    pub async fn create_document(&self, doc: &Document) -> Result<()> {
        debug!("Creating {} document: {}", doc.kind, doc.id());

        entities::Document::insert(document::Model::from_domain_document(doc))
            .exec(&self.db)
            .await
            .map_err(GatewayError::Database)?;

        Ok(())
    }

    /// Persist a changed document
    pub async fn update_document(&self, doc: &Document) -> Result<()> {
        debug!("Updating document {} to {}", doc.id(), doc.status);

        match document::Model::from_domain_document(doc)
            .update(&self.db)
            .await
        {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(GatewayError::not_found("Document not found")),
            Err(e) => Err(GatewayError::Database(e)),
        }
    }

    /// Documents matching a company column
    async fn list_documents_by(
        &self,
        column: document::Column,
        company_id: Uuid,
    ) -> Result<Vec<Document>> {
        entities::Document::find()
            .filter(column.eq(company_id))
            .order_by_desc(document::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(GatewayError::Database)?
            .iter()
            .map(|m| m.to_domain_document())
            .collect()
    }

    /// Documents issued by a company
    pub async fn list_documents_sent_by(&self, company_id: Uuid) -> Result<Vec<Document>> {
        self.list_documents_by(document::Column::SenderCompanyId, company_id)
            .await
    }

    /// Documents addressed to a company
    pub async fn list_documents_received_by(&self, company_id: Uuid) -> Result<Vec<Document>> {
        self.list_documents_by(document::Column::RecipientCompanyId, company_id)
            .await
    }
}
