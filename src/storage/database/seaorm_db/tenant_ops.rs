use crate::core::models::Tenant;
use crate::utils::error::{AnalyticsError, Result};
use chrono::Utc;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, tenant};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Create a new tenant
    pub async fn create_tenant(&self, name: &str, api_key: &str) -> Result<Tenant> {
        debug!("Creating tenant: {}", name);

        let now = Utc::now();
        let active_model = tenant::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            api_key: Set(api_key.to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AnalyticsError::Database)?;

        Ok(model.to_domain())
    }

    /// Create a tenant or rename the one already holding the API key
    pub async fn upsert_tenant(&self, name: &str, api_key: &str) -> Result<Tenant> {
        let existing = entities::Tenant::find()
            .filter(tenant::Column::ApiKey.eq(api_key))
            .one(&self.db)
            .await
            .map_err(AnalyticsError::Database)?;

        let Some(model) = existing else {
            return self.create_tenant(name, api_key).await;
        };

        debug!("Updating tenant: {}", model.id);
        let mut active_model: tenant::ActiveModel = model.into();
        active_model.name = Set(name.to_string());
        active_model.updated_at = Set(Utc::now().into());

        let model = active_model
            .update(&self.db)
            .await
            .map_err(AnalyticsError::Database)?;

        Ok(model.to_domain())
    }

    /// Find tenant by API key
    pub async fn find_tenant_by_api_key(&self, api_key: &str) -> Result<Option<Tenant>> {
        let model = entities::Tenant::find()
            .filter(tenant::Column::ApiKey.eq(api_key))
            .one(&self.db)
            .await
            .map_err(AnalyticsError::Database)?;

        Ok(model.map(|model| model.to_domain()))
    }

    /// Find tenant by ID
    pub async fn find_tenant_by_id(&self, tenant_id: Uuid) -> Result<Option<Tenant>> {
        debug!("Finding tenant by ID: {}", tenant_id);

        let model = entities::Tenant::find_by_id(tenant_id)
            .one(&self.db)
            .await
            .map_err(AnalyticsError::Database)?;

        Ok(model.map(|model| model.to_domain()))
    }
}
