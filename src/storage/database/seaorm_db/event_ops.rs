use crate::core::models::{Event, EventFilter, NewEvent};
use crate::core::traits::EventRepository;
use crate::utils::error::{AnalyticsError, Result};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, event};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Record an event
    pub async fn create_event(&self, new: &NewEvent) -> Result<Event> {
        let active_model = event::ActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(new.tenant_id),
            user_id: Set(new.user_id.clone()),
            event_type: Set(new.event_type.as_str().to_string()),
            experiment_id: Set(new.experiment_id),
            variant: Set(new.variant.clone()),
            properties: Set(new.properties.clone()),
            timestamp: Set(new.timestamp.into()),
            created_at: Set(Utc::now().into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AnalyticsError::Database)?;

        model.to_domain()
    }

    /// Events matching a filter, oldest first
    pub async fn find_events(&self, filter: &EventFilter) -> Result<Vec<Event>> {
        let mut query =
            entities::Event::find().filter(event::Column::TenantId.eq(filter.tenant_id));

        if let Some(experiment_id) = filter.experiment_id {
            query = query.filter(event::Column::ExperimentId.eq(experiment_id));
        }
        if let Some(start) = filter.start {
            query = query.filter(event::Column::Timestamp.gte(start.fixed_offset()));
        }
        if let Some(end) = filter.end {
            query = query.filter(event::Column::Timestamp.lte(end.fixed_offset()));
        }

        let models = query
            .order_by_asc(event::Column::Timestamp)
            .all(&self.db)
            .await
            .map_err(AnalyticsError::Database)?;

        debug!(
            "Loaded {} events for tenant {}",
            models.len(),
            filter.tenant_id
        );

        models.iter().map(event::Model::to_domain).collect()
    }
}

#[async_trait]
impl EventRepository for SeaOrmDatabase {
    async fn find_events(&self, filter: &EventFilter) -> Result<Vec<Event>> {
        SeaOrmDatabase::find_events(self, filter).await
    }
}
