//! Migrator holding the append-only schema history.
//! Every step has a matching `down`; new steps go at the end.
pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_users;
mod m20250101_000002_create_orders;
mod m20250115_000003_add_telegram_id_to_users;
mod m20250129_000004_add_language_code_to_users;
mod m20250203_000005_create_services;
mod m20250203_000006_extend_orders;
mod m20250203_000007_seed_services;
mod m20250210_000008_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users::Migration),
            Box::new(m20250101_000002_create_orders::Migration),
            Box::new(m20250115_000003_add_telegram_id_to_users::Migration),
            Box::new(m20250129_000004_add_language_code_to_users::Migration),
            Box::new(m20250203_000005_create_services::Migration),
            Box::new(m20250203_000006_extend_orders::Migration),
            Box::new(m20250203_000007_seed_services::Migration),
            // Indexes should always be applied last
            Box::new(m20250210_000008_add_indexes::Migration),
        ]
    }
}
