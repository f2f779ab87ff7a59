pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users_table;
mod m20250301_000002_create_sessions_table;
mod m20250301_000003_create_requirements_table;
mod m20250301_000004_create_applications_table;
mod m20250302_000001_create_contracts_table;
mod m20250302_000002_create_reviews_table;
mod m20250302_000003_create_notifications_table;
mod m20250306_000001_add_unique_workflow_constraints;
mod m20250312_000001_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_table::Migration),
            Box::new(m20250301_000002_create_sessions_table::Migration),
            Box::new(m20250301_000003_create_requirements_table::Migration),
            Box::new(m20250301_000004_create_applications_table::Migration),
            Box::new(m20250302_000001_create_contracts_table::Migration),
            Box::new(m20250302_000002_create_reviews_table::Migration),
            Box::new(m20250302_000003_create_notifications_table::Migration),
            Box::new(m20250306_000001_add_unique_workflow_constraints::Migration),
            Box::new(m20250312_000001_add_indexes::Migration),
        ]
    }
}
