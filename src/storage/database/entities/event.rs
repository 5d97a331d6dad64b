use crate::core::models::{Event, EventType};
use crate::utils::error::AnalyticsError;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Event database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    /// Event ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning tenant
    pub tenant_id: Uuid,

    /// End-user identifier
    pub user_id: String,

    /// `PAGE_VIEW`, `CLICK` or `CONVERSION`
    pub event_type: String,

    pub experiment_id: Option<Uuid>,

    pub variant: Option<String>,

    /// Submitted properties (JSON object)
    pub properties: Json,

    /// When the event occurred
    pub timestamp: DateTimeWithTimeZone,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,
}

/// Event entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tenant::Entity",
        from = "Column::TenantId",
        to = "super::tenant::Column::Id",
        on_delete = "Cascade"
    )]
    Tenant,

    #[sea_orm(
        belongs_to = "super::experiment::Entity",
        from = "Column::ExperimentId",
        to = "super::experiment::Column::Id",
        on_delete = "SetNull"
    )]
    Experiment,
}

impl Related<super::tenant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenant.def()
    }
}

impl Related<super::experiment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Experiment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain event
    ///
    /// Fails if the stored event type is outside the known set.
    pub fn to_domain(&self) -> crate::utils::error::Result<Event> {
        let event_type: EventType = self
            .event_type
            .parse()
            .map_err(|e: String| AnalyticsError::internal(format!("Event {}: {}", self.id, e)))?;

        Ok(Event {
            id: self.id,
            tenant_id: self.tenant_id,
            user_id: self.user_id.clone(),
            event_type,
            experiment_id: self.experiment_id,
            variant: self.variant.clone(),
            properties: self.properties.clone(),
            timestamp: self.timestamp.to_utc(),
            created_at: self.created_at.to_utc(),
        })
    }
}
