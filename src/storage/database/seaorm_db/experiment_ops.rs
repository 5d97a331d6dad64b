use crate::core::models::{
    Experiment, ExperimentCounts, ExperimentDetail, ExperimentStatus, NewExperiment,
};
use crate::utils::error::{AnalyticsError, Result};
use chrono::Utc;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, event, experiment, user_assignment};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Create a new experiment
    pub async fn create_experiment(&self, new: &NewExperiment) -> Result<Experiment> {
        debug!("Creating experiment '{}' for tenant {}", new.name, new.tenant_id);

        let now = Utc::now();
        let active_model = experiment::ActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(new.tenant_id),
            name: Set(new.name.clone()),
            description: Set(new.description.clone()),
            status: Set(new.status.as_str().to_string()),
            variants: Set(serde_json::json!(new.variants)),
            start_date: Set(new.start_date.map(Into::into)),
            end_date: Set(new.end_date.map(Into::into)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AnalyticsError::Database)?;

        Ok(model.to_domain())
    }

    /// Experiments of a tenant, newest first
    pub async fn list_experiments(&self, tenant_id: Uuid) -> Result<Vec<Experiment>> {
        debug!("Listing experiments for tenant {}", tenant_id);

        let models = entities::Experiment::find()
            .filter(experiment::Column::TenantId.eq(tenant_id))
            .order_by_desc(experiment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AnalyticsError::Database)?;

        Ok(models.iter().map(experiment::Model::to_domain).collect())
    }

    /// A tenant's experiment without related counts
    pub async fn get_experiment(
        &self,
        tenant_id: Uuid,
        experiment_id: Uuid,
    ) -> Result<Option<Experiment>> {
        Ok(self
            .find_experiment_model(tenant_id, experiment_id)
            .await?
            .map(|model| model.to_domain()))
    }

    /// A tenant's experiment with its event and assignment counts
    pub async fn find_experiment(
        &self,
        tenant_id: Uuid,
        experiment_id: Uuid,
    ) -> Result<Option<ExperimentDetail>> {
        let Some(model) = self.find_experiment_model(tenant_id, experiment_id).await? else {
            return Ok(None);
        };

        let events = entities::Event::find()
            .filter(event::Column::TenantId.eq(tenant_id))
            .filter(event::Column::ExperimentId.eq(experiment_id))
            .count(&self.db)
            .await
            .map_err(AnalyticsError::Database)?;

        let user_assignments = entities::UserAssignment::find()
            .filter(user_assignment::Column::TenantId.eq(tenant_id))
            .filter(user_assignment::Column::ExperimentId.eq(experiment_id))
            .count(&self.db)
            .await
            .map_err(AnalyticsError::Database)?;

        Ok(Some(ExperimentDetail {
            experiment: model.to_domain(),
            count: ExperimentCounts {
                events,
                user_assignments,
            },
        }))
    }

    /// Change the status of a tenant's experiment
    pub async fn update_experiment_status(
        &self,
        tenant_id: Uuid,
        experiment_id: Uuid,
        status: ExperimentStatus,
    ) -> Result<Experiment> {
        debug!("Updating experiment status: {} -> {}", experiment_id, status);

        let model = self
            .find_experiment_model(tenant_id, experiment_id)
            .await?
            .ok_or_else(|| {
                AnalyticsError::not_found(format!("Experiment with ID {} not found", experiment_id))
            })?;

        let mut active_model: experiment::ActiveModel = model.into();
        active_model.status = Set(status.as_str().to_string());
        active_model.updated_at = Set(Utc::now().into());

        let model = active_model
            .update(&self.db)
            .await
            .map_err(AnalyticsError::Database)?;

        Ok(model.to_domain())
    }

    async fn find_experiment_model(
        &self,
        tenant_id: Uuid,
        experiment_id: Uuid,
    ) -> Result<Option<experiment::Model>> {
        entities::Experiment::find_by_id(experiment_id)
            .filter(experiment::Column::TenantId.eq(tenant_id))
            .one(&self.db)
            .await
            .map_err(AnalyticsError::Database)
    }
}
