use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User assignment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_assignments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub tenant_id: Uuid,

    pub experiment_id: Uuid,

    pub user_id: String,

    /// Assigned variant label
    pub variant: String,

    pub created_at: DateTimeWithTimeZone,
}

/// User assignment entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::experiment::Entity",
        from = "Column::ExperimentId",
        to = "super::experiment::Column::Id",
        on_delete = "Cascade"
    )]
    Experiment,
}

impl Related<super::experiment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Experiment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain assignment
    pub fn to_domain(&self) -> crate::core::models::UserAssignment {
        crate::core::models::UserAssignment {
            id: self.id,
            tenant_id: self.tenant_id,
            experiment_id: self.experiment_id,
            user_id: self.user_id.clone(),
            variant: self.variant.clone(),
            created_at: self.created_at.to_utc(),
        }
    }
}
