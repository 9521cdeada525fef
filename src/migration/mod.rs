//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_profiles;
mod m20260301_000002_create_service_types;
mod m20260301_000003_create_service_reports;
mod m20260301_000004_create_assignments;
mod m20260301_000005_create_library_items;
mod m20260301_000006_create_seed_lookup;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_profiles::Migration),
            Box::new(m20260301_000002_create_service_types::Migration),
            Box::new(m20260301_000003_create_service_reports::Migration),
            Box::new(m20260301_000004_create_assignments::Migration),
            Box::new(m20260301_000005_create_library_items::Migration),
            Box::new(m20260301_000006_create_seed_lookup::Migration),
        ]
    }
}
