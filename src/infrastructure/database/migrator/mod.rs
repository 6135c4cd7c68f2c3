//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_themes;
mod m20240601_000002_create_reservation_times;
mod m20240601_000003_create_reservations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_themes::Migration),
            Box::new(m20240601_000002_create_reservation_times::Migration),
            Box::new(m20240601_000003_create_reservations::Migration),
        ]
    }
}
