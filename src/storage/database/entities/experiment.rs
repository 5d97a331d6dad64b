use crate::core::models::{Experiment, ExperimentStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Experiment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "experiments")]
pub struct Model {
    /// Experiment ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning tenant
    pub tenant_id: Uuid,

    pub name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// `DRAFT`, `ACTIVE` or `COMPLETED`
    pub status: String,

    /// Variant configuration (JSON array)
    pub variants: Json,

    pub start_date: Option<DateTimeWithTimeZone>,

    pub end_date: Option<DateTimeWithTimeZone>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Experiment entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tenant::Entity",
        from = "Column::TenantId",
        to = "super::tenant::Column::Id",
        on_delete = "Cascade"
    )]
    Tenant,

    #[sea_orm(has_many = "super::event::Entity")]
    Events,

    #[sea_orm(has_many = "super::user_assignment::Entity")]
    UserAssignments,
}

impl Related<super::tenant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenant.def()
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl Related<super::user_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserAssignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain experiment
    pub fn to_domain(&self) -> Experiment {
        let status = self.status.parse().unwrap_or_else(|e| {
            warn!("Experiment {} has {}; treating as DRAFT", self.id, e);
            ExperimentStatus::Draft
        });

        Experiment {
            id: self.id,
            tenant_id: self.tenant_id,
            name: self.name.clone(),
            description: self.description.clone(),
            status,
            variants: self.variants.clone(),
            start_date: self.start_date.map(|dt| dt.to_utc()),
            end_date: self.end_date.map(|dt| dt.to_utc()),
            created_at: self.created_at.to_utc(),
            updated_at: self.updated_at.to_utc(),
        }
    }
}
