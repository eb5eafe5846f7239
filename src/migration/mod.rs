// ABOUTME: Schema migrations for the acronyms database, applied on every startup
// ABOUTME: Storage::new runs them before serving so a fresh SQLite file is usable immediately

use sea_orm_migration::prelude::*;

mod m20241201_000001_create_acronym_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20241201_000001_create_acronym_tables::Migration)]
    }
}
