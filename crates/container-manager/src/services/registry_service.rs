//! Сервис реестра менеджеров: регистрация, загрузка, список.

use crate::capability::{InfraManagerCapability, MonitoringManagerCapability};
use crate::error::AppError;
use crate::manager::ContainerManager;
use crate::services::finish;
use chrono::Utc;
use container_entities::endpoints::{self, DEFAULT_ROLE};
use container_entities::ext_management_systems::{
    ActiveModel, Column, Entity as ManagerEntity, ManagerKind, Model,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, ModelTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Данные для регистрации менеджера.
pub struct RegisterData {
    pub name: String,
    pub hostname: String,
    pub port: Option<i32>,
    pub zone: Option<String>,
}

/// Зарегистрировать менеджер контейнеров вместе с основным endpoint.
pub async fn register_manager(
    db: &DatabaseConnection,
    data: RegisterData,
) -> Result<ContainerManager, AppError> {
    if data.name.is_empty() || data.hostname.is_empty() {
        return Err(AppError::BadRequest("name и hostname обязательны".into()));
    }

    let existing = ManagerEntity::find()
        .filter(Column::Name.eq(&data.name))
        .filter(Column::Kind.eq(ManagerKind::Container))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(format!(
            "Менеджер с именем {} уже существует",
            data.name
        )));
    }

    // Менеджер, основной endpoint и хук создания фиксируются вместе
    let txn = db.begin().await?;
    let result = insert_manager(&txn, data).await;
    let manager = finish(txn, result).await?;

    info!(
        "Зарегистрирован менеджер {} ({})",
        manager.record.name,
        manager.id()
    );
    Ok(manager)
}

async fn insert_manager(
    txn: &DatabaseTransaction,
    data: RegisterData,
) -> Result<ContainerManager, AppError> {
    let now = Utc::now().to_rfc3339();
    let id = Uuid::new_v4().to_string();
    let name = data.name.clone();

    let record = ActiveModel {
        id: Set(id.clone()),
        name: Set(data.name),
        kind: Set(ManagerKind::Container),
        parent_ems_id: Set(None),
        zone: Set(data.zone),
        created_on: Set(now.clone()),
    }
    .insert(txn)
    .await
    .map_err(|e| {
        AppError::unique_conflict(e, || format!("Менеджер с именем {name} уже существует"))
    })?;
    let endpoint = endpoints::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        ems_id: Set(id),
        role: Set(DEFAULT_ROLE.to_string()),
        hostname: Set(data.hostname),
        port: Set(data.port),
        created_on: Set(now),
    }
    .insert(txn)
    .await?;

    let manager = with_capabilities(record, Some(endpoint));
    manager.on_endpoint_created(txn, DEFAULT_ROLE).await?;
    Ok(manager)
}

/// Загрузить менеджер контейнеров со всеми возможностями.
pub async fn load_manager(db: &DatabaseConnection, id: &str) -> Result<ContainerManager, AppError> {
    let record = get_manager(db, id).await?;
    let default_endpoint = endpoints::Entity::find()
        .filter(endpoints::Column::EmsId.eq(id))
        .filter(endpoints::Column::Role.eq(DEFAULT_ROLE))
        .one(db)
        .await?;

    Ok(with_capabilities(record, default_endpoint))
}

fn with_capabilities(record: Model, default_endpoint: Option<endpoints::Model>) -> ContainerManager {
    ContainerManager::new(record, default_endpoint)
        .with_monitoring(Arc::new(MonitoringManagerCapability))
        .with_virtualization(Arc::new(InfraManagerCapability))
}

/// Получить запись менеджера контейнеров по id.
pub async fn get_manager(db: &DatabaseConnection, id: &str) -> Result<Model, AppError> {
    ManagerEntity::find_by_id(id)
        .filter(Column::Kind.eq(ManagerKind::Container))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Менеджер не найден: {id}")))
}

/// Список менеджеров контейнеров (без дочерних infra/monitoring).
pub async fn list_managers(db: &DatabaseConnection) -> Result<Vec<Model>, AppError> {
    let managers = ManagerEntity::find()
        .filter(Column::Kind.eq(ManagerKind::Container))
        .order_by_asc(Column::Name)
        .all(db)
        .await?;
    Ok(managers)
}

/// Дочерние менеджеры (infra, monitoring).
pub async fn child_managers(db: &DatabaseConnection, id: &str) -> Result<Vec<Model>, AppError> {
    let record = get_manager(db, id).await?;
    let children = record
        .find_linked(container_entities::ext_management_systems::ChildManagers)
        .all(db)
        .await?;
    Ok(children)
}
