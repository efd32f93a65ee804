//! Миграции схемы менеджера контейнеров.

pub use sea_orm_migration::prelude::*;

mod m001_create_managers;
mod m002_create_inventory;
mod m003_create_subresources;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m001_create_managers::Migration),
            Box::new(m002_create_inventory::Migration),
            Box::new(m003_create_subresources::Migration),
        ]
    }
}
