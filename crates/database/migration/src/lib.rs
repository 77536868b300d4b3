//! The schema migrations of the rollup node database.

pub use sea_orm_migration::prelude::*;

mod m20251015_000001_create_metadata_table;

/// The migrator of the rollup node database.
#[derive(Debug)]
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20251015_000001_create_metadata_table::Migration)]
    }
}
