use crate::auth::access::{CompanyMembershipLookup, DocumentLookup};
use crate::core::models::{Company, CompanyMembership, Document, Role, User};
use crate::storage::store::Store;
use crate::utils::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::types::SeaOrmDatabase;

#[async_trait]
impl CompanyMembershipLookup for SeaOrmDatabase {
    async fn get_company_by_id(&self, company_id: Uuid) -> Result<Option<Company>> {
        self.find_company_by_id(company_id).await
    }

    async fn get_membership(
        &self,
        company_id: Uuid,
        user_id: Uuid,
        roles: &[Role],
    ) -> Result<Option<CompanyMembership>> {
        self.find_membership(company_id, user_id, roles).await
    }
}

#[async_trait]
impl DocumentLookup for SeaOrmDatabase {
    async fn get_document(&self, document_id: Uuid) -> Result<Option<Document>> {
        self.find_document_by_id(document_id).await
    }
}

#[async_trait]
impl Store for SeaOrmDatabase {
    async fn insert_user(&self, user: &User) -> Result<()> {
        self.create_user(user).await
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        SeaOrmDatabase::find_user_by_id(self, user_id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        SeaOrmDatabase::find_user_by_email(self, email).await
    }

    async fn update_user_last_login(&self, user_id: Uuid) -> Result<()> {
        SeaOrmDatabase::update_user_last_login(self, user_id).await
    }

    async fn insert_company(&self, company: &Company) -> Result<()> {
        self.create_company(company).await
    }

    async fn list_companies_for_user(&self, user_id: Uuid) -> Result<Vec<Company>> {
        SeaOrmDatabase::list_companies_for_user(self, user_id).await
    }

    async fn insert_membership(&self, membership: &CompanyMembership) -> Result<()> {
        self.create_membership(membership).await
    }

    async fn find_membership_by_id(
        &self,
        membership_id: Uuid,
    ) -> Result<Option<CompanyMembership>> {
        SeaOrmDatabase::find_membership_by_id(self, membership_id).await
    }

    async fn list_memberships(&self, company_id: Uuid) -> Result<Vec<CompanyMembership>> {
        SeaOrmDatabase::list_memberships(self, company_id).await
    }

    async fn update_membership(&self, membership: &CompanyMembership) -> Result<()> {
        SeaOrmDatabase::update_membership(self, membership).await
    }

    async fn insert_document(&self, document: &Document) -> Result<()> {
        self.create_document(document).await
    }

    async fn update_document(&self, document: &Document) -> Result<()> {
        SeaOrmDatabase::update_document(self, document).await
    }

    async fn list_documents_sent_by(&self, company_id: Uuid) -> Result<Vec<Document>> {
        SeaOrmDatabase::list_documents_sent_by(self, company_id).await
    }

    async fn list_documents_received_by(&self, company_id: Uuid) -> Result<Vec<Document>> {
        SeaOrmDatabase::list_documents_received_by(self, company_id).await
    }

    async fn health_check(&self) -> Result<()> {
        SeaOrmDatabase::health_check(self).await
    }
}
