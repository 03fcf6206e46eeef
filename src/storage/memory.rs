//! In-memory storage backend
//!
//! Used when no database is configured and as a deterministic store in
//! tests. Rows are kept in insertion order.

use super::store::Store;
use crate::auth::access::{CompanyMembershipLookup, DocumentLookup};
use crate::core::models::{Company, CompanyMembership, Document, Role, User};
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<User>,
    companies: Vec<Company>,
    memberships: Vec<CompanyMembership>,
    documents: Vec<Document>,
}

/// In-memory store guarded by a single lock
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompanyMembershipLookup for MemoryStore {
    async fn get_company_by_id(&self, company_id: Uuid) -> Result<Option<Company>> {
        let state = self.state.read();
        Ok(state
            .companies
            .iter()
            .find(|c| c.id() == company_id)
            .cloned())
    }

    async fn get_membership(
        &self,
        company_id: Uuid,
        user_id: Uuid,
        roles: &[Role],
    ) -> Result<Option<CompanyMembership>> {
        let state = self.state.read();
        Ok(state
            .memberships
            .iter()
            .find(|m| m.company_id == company_id && m.user_id == user_id && roles.contains(&m.role))
            .cloned())
    }
}

#[async_trait]
impl DocumentLookup for MemoryStore {
    async fn get_document(&self, document_id: Uuid) -> Result<Option<Document>> {
        let state = self.state.read();
        Ok(state
            .documents
            .iter()
            .find(|d| d.id() == document_id)
            .cloned())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<()> {
        let mut state = self.state.write();
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(GatewayError::conflict("Email already registered"));
        }
        debug!("Inserting user: {}", user.id());
        state.users.push(user.clone());
        Ok(())
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let state = self.state.read();
        Ok(state.users.iter().find(|u| u.id() == user_id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let state = self.state.read();
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_user_last_login(&self, user_id: Uuid) -> Result<()> {
        let mut state = self.state.write();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id() == user_id)
            .ok_or_else(|| GatewayError::not_found("User not found"))?;
        user.last_login_at = Some(chrono::Utc::now());
        user.metadata.touch();
        Ok(())
    }

    async fn insert_company(&self, company: &Company) -> Result<()> {
        let mut state = self.state.write();
        state.companies.push(company.clone());
        Ok(())
    }

    async fn list_companies_for_user(&self, user_id: Uuid) -> Result<Vec<Company>> {
        let state = self.state.read();
        Ok(state
            .companies
            .iter()
            .filter(|c| {
                c.is_owned_by(user_id)
                    || state.memberships.iter().any(|m| {
                        m.company_id == c.id()
                            && m.user_id == user_id
                            && m.role == Role::TeamMember
                            && m.is_accepted()
                    })
            })
            .cloned()
            .collect())
    }

    async fn insert_membership(&self, membership: &CompanyMembership) -> Result<()> {
        let mut state = self.state.write();
        state.memberships.push(membership.clone());
        Ok(())
    }

    async fn find_membership_by_id(
        &self,
        membership_id: Uuid,
    ) -> Result<Option<CompanyMembership>> {
        let state = self.state.read();
        Ok(state
            .memberships
            .iter()
            .find(|m| m.metadata.id == membership_id)
            .cloned())
    }

    async fn list_memberships(&self, company_id: Uuid) -> Result<Vec<CompanyMembership>> {
        let state = self.state.read();
        Ok(state
            .memberships
            .iter()
            .filter(|m| m.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn update_membership(&self, membership: &CompanyMembership) -> Result<()> {
        let mut state = self.state.write();
        let existing = state
            .memberships
            .iter_mut()
            .find(|m| m.metadata.id == membership.metadata.id)
            .ok_or_else(|| GatewayError::not_found("Membership not found"))?;
        *existing = membership.clone();
        Ok(())
    }

    async fn insert_document(&self, document: &Document) -> Result<()> {
        let mut state = self.state.write();
        state.documents.push(document.clone());
        Ok(())
    }

    async fn update_document(&self, document: &Document) -> Result<()> {
        let mut state = self.state.write();
        let existing = state
            .documents
            .iter_mut()
            .find(|d| d.id() == document.id())
            .ok_or_else(|| GatewayError::not_found("Document not found"))?;
        *existing = document.clone();
        Ok(())
    }

    async fn list_documents_sent_by(&self, company_id: Uuid) -> Result<Vec<Document>> {
        let state = self.state.read();
        Ok(state
            .documents
            .iter()
            .filter(|d| d.sender_company_id == company_id)
            .cloned()
            .collect())
    }

    async fn list_documents_received_by(&self, company_id: Uuid) -> Result<Vec<Document>> {
        let state = self.state.read();
        Ok(state
            .documents
            .iter()
            .filter(|d| d.recipient_company_id == Some(company_id))
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{DocumentKind, Permission};

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        store
            .insert_user(&User::new("a@example.com", None, "hash".to_string()))
            .await
            .unwrap();

        let result = store
            .insert_user(&User::new("a@example.com", None, "hash".to_string()))
            .await;
        assert!(matches!(result, Err(GatewayError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_get_membership_filters_by_role() {
        let store = MemoryStore::new();
        let company_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        store
            .insert_membership(&CompanyMembership::recipient(
                company_id,
                user_id,
                Role::SafeRecipient,
            ))
            .await
            .unwrap();

        let team = store
            .get_membership(company_id, user_id, &[Role::TeamMember])
            .await
            .unwrap();
        assert!(team.is_none());

        let any = store
            .get_membership(
                company_id,
                user_id,
                &[Role::TeamMember, Role::SafeRecipient],
            )
            .await
            .unwrap();
        assert_eq!(any.unwrap().role, Role::SafeRecipient);
    }

    #[tokio::test]
    async fn test_list_companies_for_user() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let member = Uuid::new_v4();

        let company = Company::new("Acme", owner);
        store.insert_company(&company).await.unwrap();

        let mut invite = CompanyMembership::invite(company.id(), member, Permission::View);
        store.insert_membership(&invite).await.unwrap();
        assert!(store.list_companies_for_user(member).await.unwrap().is_empty());

        invite.invite_status = Some(crate::core::models::InviteStatus::Accepted);
        store.update_membership(&invite).await.unwrap();
        assert_eq!(store.list_companies_for_user(member).await.unwrap().len(), 1);
        assert_eq!(store.list_companies_for_user(owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_document_listing() {
        let store = MemoryStore::new();
        let sender = Uuid::new_v4();
        let angel = Uuid::new_v4();

        let mut doc = Document::draft(DocumentKind::SafeNote, sender, 100_000);
        doc.recipient_company_id = Some(angel);
        store.insert_document(&doc).await.unwrap();

        assert_eq!(store.list_documents_sent_by(sender).await.unwrap().len(), 1);
        assert_eq!(store.list_documents_received_by(angel).await.unwrap().len(), 1);
        assert!(store.list_documents_received_by(sender).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_document() {
        let store = MemoryStore::new();
        let doc = Document::draft(DocumentKind::TermSheet, Uuid::new_v4(), 1);
        let result = store.update_document(&doc).await;
        assert!(matches!(result, Err(GatewayError::NotFound(_))));
    }
}
