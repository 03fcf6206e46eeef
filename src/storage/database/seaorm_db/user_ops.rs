use crate::core::models::User;
use crate::utils::error::{GatewayError, Result};
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, user};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Find user by ID
    pub async fn find_user_by_id(&self, user_id: uuid::Uuid) -> Result<Option<User>> {
        debug!("Finding user by ID: {}", user_id);

        let user_model = entities::User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(GatewayError::Database)?;

        Ok(user_model.map(|model| model.to_domain_user()))
    }

    /// Find user by email
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        debug!("Finding user by email: {}", email);

        let user_model = entities::User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(GatewayError::Database)?;

        Ok(user_model.map(|model| model.to_domain_user()))
    }

    /// Create a new user
    pub async fn create_user(&self, user: &User) -> Result<()> {
        debug!("Creating user: {}", user.id());

        if self.find_user_by_email(&user.email).await?.is_some() {
            return Err(GatewayError::conflict("Email already registered"));
        }

        let active_model = user::Model::from_domain_user(user);
        entities::User::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(GatewayError::Database)?;

        Ok(())
    }

    /// Update user last login time
    pub async fn update_user_last_login(&self, user_id: uuid::Uuid) -> Result<()> {
        debug!("Updating last login for user: {}", user_id);

        let mut user: user::ActiveModel = entities::User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(GatewayError::Database)?
            .ok_or_else(|| GatewayError::NotFound("User not found".to_string()))?
            .into();

        let now = chrono::Utc::now();
        user.last_login_at = Set(Some(now.into()));
        user.updated_at = Set(now.into());

        user.update(&self.db)
            .await
            .map_err(GatewayError::Database)?;

        Ok(())
    }
}
