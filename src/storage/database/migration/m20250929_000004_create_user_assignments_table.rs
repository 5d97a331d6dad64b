use sea_orm_migration::prelude::*;

use super::m20250929_000001_create_tenants_table::Tenants;
use super::m20250929_000002_create_experiments_table::Experiments;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserAssignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserAssignments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserAssignments::TenantId).uuid().not_null())
                    .col(
                        ColumnDef::new(UserAssignments::ExperimentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserAssignments::UserId).string().not_null())
                    .col(ColumnDef::new(UserAssignments::Variant).string().not_null())
                    .col(
                        ColumnDef::new(UserAssignments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_assignments_tenant_id")
                            .from(UserAssignments::Table, UserAssignments::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_assignments_experiment_id")
                            .from(UserAssignments::Table, UserAssignments::ExperimentId)
                            .to(Experiments::Table, Experiments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_assignments_experiment_id")
                    .table(UserAssignments::Table)
                    .col(UserAssignments::ExperimentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserAssignments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserAssignments {
    Table,
    Id,
    TenantId,
    ExperimentId,
    UserId,
    Variant,
    CreatedAt,
}
