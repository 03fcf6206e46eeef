use crate::core::models::{Company, InviteStatus, Role};
use crate::utils::error::{GatewayError, Result};
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, company, company_member};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Find company by ID
    pub async fn find_company_by_id(&self, company_id: Uuid) -> Result<Option<Company>> {
        debug!("Finding company by ID: {}", company_id);

        let model = entities::Company::find_by_id(company_id)
            .one(&self.db)
            .await
            .map_err(GatewayError::Database)?;

        Ok(model.map(|m| m.to_domain_company()))
    }

    /// Create a new company
    pub async fn create_company(&self, company: &Company) -> Result<()> {
        debug!("Creating company: {} ({})", company.name, company.id());

        entities::Company::insert(company::Model::from_domain_company(company))
            .exec(&self.db)
            .await
            .map_err(GatewayError::Database)?;

        Ok(())
    }

    /// Companies owned by the user or joined as an accepted team member
    pub async fn list_companies_for_user(&self, user_id: Uuid) -> Result<Vec<Company>> {
        let joined: Vec<Uuid> = entities::CompanyMember::find()
            .filter(company_member::Column::UserId.eq(user_id))
            .filter(company_member::Column::Role.eq(Role::TeamMember.to_string()))
            .filter(company_member::Column::InviteStatus.eq(InviteStatus::Accepted.to_string()))
            .all(&self.db)
            .await
            .map_err(GatewayError::Database)?
            .into_iter()
            .map(|m| m.company_id)
            .collect();

        let models = entities::Company::find()
            .filter(
                Condition::any()
                    .add(company::Column::OwnerId.eq(user_id))
                    .add(company::Column::Id.is_in(joined)),
            )
            .order_by_asc(company::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(GatewayError::Database)?;

        Ok(models.iter().map(|m| m.to_domain_company()).collect())
    }
}
