use crate::core::models::{CompanyMembership, Role};
use crate::utils::error::{GatewayError, Result};
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, company_member};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// First membership row of the user in the company holding one of `roles`
    pub async fn find_membership(
        &self,
        company_id: Uuid,
        user_id: Uuid,
        roles: &[Role],
    ) -> Result<Option<CompanyMembership>> {
        let role_names: Vec<String> = roles.iter().map(|r| r.to_string()).collect();

        let model = entities::CompanyMember::find()
            .filter(company_member::Column::CompanyId.eq(company_id))
            .filter(company_member::Column::UserId.eq(user_id))
            .filter(company_member::Column::Role.is_in(role_names))
            .order_by_asc(company_member::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(GatewayError::Database)?;

        model.map(|m| m.to_domain_membership()).transpose()
    }

    /// Find membership by ID
    pub async fn find_membership_by_id(
        &self,
        membership_id: Uuid,
    ) -> Result<Option<CompanyMembership>> {
        let model = entities::CompanyMember::find_by_id(membership_id)
            .one(&self.db)
            .await
            .map_err(GatewayError::Database)?;

        model.map(|m| m.to_domain_membership()).transpose()
    }

    /// All membership rows of a company
    pub async fn list_memberships(&self, company_id: Uuid) -> Result<Vec<CompanyMembership>> {
        entities::CompanyMember::find()
            .filter(company_member::Column::CompanyId.eq(company_id))
            .order_by_asc(company_member::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(GatewayError::Database)?
            .iter()
            .map(|m| m.to_domain_membership())
            .collect()
    }

    /// Create a membership row
    pub async fn create_membership(&self, membership: &CompanyMembership) -> Result<()> {
        debug!(
            "Creating {} membership for user {} in company {}",
            membership.role, membership.user_id, membership.company_id
        );

        entities::CompanyMember::insert(company_member::Model::from_domain_membership(membership))
            .exec(&self.db)
            .await
            .map_err(GatewayError::Database)?;

        Ok(())
    }

    /// Persist a changed membership row
    pub async fn update_membership(&self, membership: &CompanyMembership) -> Result<()> {
        debug!("Updating membership: {}", membership.metadata.id);

        match company_member::Model::from_domain_membership(membership)
            .update(&self.db)
            .await
        {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(GatewayError::not_found("Membership not found")),
            Err(e) => Err(GatewayError::Database(e)),
        }
    }
}
