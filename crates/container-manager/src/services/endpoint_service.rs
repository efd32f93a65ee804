//! Сервис endpoints: добавление и удаление с вызовом хуков менеджера.

use crate::error::AppError;
use crate::manager::ContainerManager;
use crate::services::{finish, registry_service};
use chrono::Utc;
use container_entities::endpoints::{ActiveModel, Column, Entity as EndpointEntity, Model, DEFAULT_ROLE};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, ModelTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

/// Данные нового endpoint.
pub struct EndpointData {
    pub role: String,
    pub hostname: String,
    pub port: Option<i32>,
}

/// Добавить endpoint и вызвать хук `on_endpoint_created`.
///
/// Endpoint и изменения, сделанные хуком, фиксируются одной транзакцией.
pub async fn add_endpoint(
    db: &DatabaseConnection,
    ems_id: &str,
    data: EndpointData,
) -> Result<Model, AppError> {
    if data.role.is_empty() || data.hostname.is_empty() {
        return Err(AppError::BadRequest("role и hostname обязательны".into()));
    }

    let manager = registry_service::load_manager(db, ems_id).await?;

    let txn = db.begin().await?;
    let result = insert_endpoint(&txn, &manager, data).await;
    finish(txn, result).await
}

async fn insert_endpoint(
    txn: &DatabaseTransaction,
    manager: &ContainerManager,
    data: EndpointData,
) -> Result<Model, AppError> {
    let ems_id = manager.id();
    let conflict = || format!("Endpoint {} уже существует у менеджера {ems_id}", data.role);

    if find_endpoint(txn, ems_id, &data.role).await?.is_some() {
        return Err(AppError::Conflict(conflict()));
    }

    let endpoint = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        ems_id: Set(ems_id.to_string()),
        role: Set(data.role.clone()),
        hostname: Set(data.hostname.clone()),
        port: Set(data.port),
        created_on: Set(Utc::now().to_rfc3339()),
    }
    .insert(txn)
    .await
    .map_err(|e| AppError::unique_conflict(e, conflict))?;

    manager.on_endpoint_created(txn, &data.role).await?;
    info!("Добавлен endpoint {} менеджеру {ems_id}", data.role);
    Ok(endpoint)
}

/// Удалить endpoint и вызвать хук `on_endpoint_destroyed`.
///
/// Основной endpoint удаляется только вместе с менеджером. Если хук не
/// смог выполниться, endpoint остаётся на месте.
pub async fn remove_endpoint(
    db: &DatabaseConnection,
    ems_id: &str,
    role: &str,
) -> Result<(), AppError> {
    if role == DEFAULT_ROLE {
        return Err(AppError::BadRequest(
            "Основной endpoint удаляется только вместе с менеджером".into(),
        ));
    }

    let manager = registry_service::load_manager(db, ems_id).await?;

    let txn = db.begin().await?;
    let result = delete_endpoint(&txn, &manager, role).await;
    finish(txn, result).await
}

async fn delete_endpoint(
    txn: &DatabaseTransaction,
    manager: &ContainerManager,
    role: &str,
) -> Result<(), AppError> {
    let ems_id = manager.id();
    let endpoint = find_endpoint(txn, ems_id, role)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Endpoint {role} не найден у {ems_id}")))?;

    endpoint.delete(txn).await?;
    manager.on_endpoint_destroyed(txn, role).await?;
    info!("Удалён endpoint {role} менеджера {ems_id}");
    Ok(())
}

/// Endpoints менеджера.
pub async fn list_endpoints(db: &DatabaseConnection, ems_id: &str) -> Result<Vec<Model>, AppError> {
    let endpoints = EndpointEntity::find()
        .filter(Column::EmsId.eq(ems_id))
        .order_by_asc(Column::Role)
        .all(db)
        .await?;
    Ok(endpoints)
}

async fn find_endpoint<C: ConnectionTrait>(
    db: &C,
    ems_id: &str,
    role: &str,
) -> Result<Option<Model>, AppError> {
    let endpoint = EndpointEntity::find()
        .filter(Column::EmsId.eq(ems_id))
        .filter(Column::Role.eq(role))
        .one(db)
        .await?;
    Ok(endpoint)
}
