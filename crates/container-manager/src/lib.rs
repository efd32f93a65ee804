//! Менеджер контейнеров: схема связей, возможности и каскадное удаление.

pub mod capability;
pub mod config;
pub mod error;
pub mod manager;
pub mod schema;
pub mod services;

#[cfg(test)]
mod tests;

use config::Config;
use container_migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::info;

/// Подключиться к БД и, если включено, выполнить миграции.
pub async fn connect(config: &Config) -> anyhow::Result<DatabaseConnection> {
    info!("Подключение к базе данных: {}", config.db_url);
    let db: DatabaseConnection = Database::connect(&config.db_url).await?;

    if config.run_migrations {
        info!("Выполнение миграций...");
        Migrator::up(&db, None).await?;
    }

    Ok(db)
}
