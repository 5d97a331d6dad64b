use crate::core::models::UserAssignment;
use crate::utils::error::{AnalyticsError, Result};
use chrono::Utc;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::user_assignment;
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Record that a user was assigned a variant
    pub async fn create_assignment(
        &self,
        tenant_id: Uuid,
        experiment_id: Uuid,
        user_id: &str,
        variant: &str,
    ) -> Result<UserAssignment> {
        debug!(
            "Assigning user {} to variant {} of experiment {}",
            user_id, variant, experiment_id
        );

        let active_model = user_assignment::ActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(tenant_id),
            experiment_id: Set(experiment_id),
            user_id: Set(user_id.to_string()),
            variant: Set(variant.to_string()),
            created_at: Set(Utc::now().into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AnalyticsError::Database)?;

        Ok(model.to_domain())
    }
}
