use sea_orm_migration::prelude::*;

mod m20250929_000001_create_tenants_table;
mod m20250929_000002_create_experiments_table;
mod m20250929_000003_create_events_table;
mod m20250929_000004_create_user_assignments_table;

/// Database migrator for SeaORM
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250929_000001_create_tenants_table::Migration),
            Box::new(m20250929_000002_create_experiments_table::Migration),
            Box::new(m20250929_000003_create_events_table::Migration),
            Box::new(m20250929_000004_create_user_assignments_table::Migration),
        ]
    }
}
