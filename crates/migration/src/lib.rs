//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_user;
mod m20250101_000002_create_category;
mod m20250101_000003_create_service_listing;
mod m20250101_000004_create_booking;
mod m20250101_000005_create_review;
mod m20250101_000006_create_message;
mod m20250101_000007_create_dispute;
mod m20250101_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_user::Migration),
            Box::new(m20250101_000002_create_category::Migration),
            Box::new(m20250101_000003_create_service_listing::Migration),
            Box::new(m20250101_000004_create_booking::Migration),
            Box::new(m20250101_000005_create_review::Migration),
            Box::new(m20250101_000006_create_message::Migration),
            Box::new(m20250101_000007_create_dispute::Migration),
            // Indexes should always be applied last
            Box::new(m20250101_000010_add_indexes::Migration),
        ]
    }
}
