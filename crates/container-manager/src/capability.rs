//! Опциональные возможности менеджера: мониторинг и виртуализация.
//!
//! Менеджер хранит реализации как `Option<Arc<dyn ...>>` и вызывает хуки
//! только у присутствующих возможностей (см. [`crate::manager::ContainerManager`]).
//! Хуки работают в транзакции, которая сохраняет или удаляет endpoint:
//! ошибка хука откатывает и изменение endpoint.

use crate::error::AppError;
use crate::services::cascade_service;
use async_trait::async_trait;
use chrono::Utc;
use container_entities::ext_management_systems::{
    ActiveModel, Column, Entity as ManagerEntity, ManagerKind, Model,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseTransaction,
    EntityTrait, QueryFilter,
};
use tracing::info;
use uuid::Uuid;

/// Роль endpoint, включающая дочерний менеджер виртуализации.
pub const KUBEVIRT_ROLE: &str = "kubevirt";

/// Роль endpoint, включающая дочерний менеджер мониторинга (алерты).
pub const PROMETHEUS_ALERTS_ROLE: &str = "prometheus_alerts";

/// Возможность мониторинга.
#[async_trait]
pub trait MonitoringCapability: Send + Sync {
    async fn monitoring_endpoint_created(
        &self,
        txn: &DatabaseTransaction,
        manager: &Model,
        role: &str,
    ) -> Result<(), AppError>;

    async fn monitoring_endpoint_destroyed(
        &self,
        txn: &DatabaseTransaction,
        manager: &Model,
        role: &str,
    ) -> Result<(), AppError>;
}

/// Возможность виртуализации.
#[async_trait]
pub trait VirtualizationCapability: Send + Sync {
    async fn virtualization_endpoint_created(
        &self,
        txn: &DatabaseTransaction,
        manager: &Model,
        role: &str,
    ) -> Result<(), AppError>;

    async fn virtualization_endpoint_destroyed(
        &self,
        txn: &DatabaseTransaction,
        manager: &Model,
        role: &str,
    ) -> Result<(), AppError>;
}

/// Поддерживаемые функции менеджера.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Feature {
    AuthenticationStatus,
    Metrics,
    Performance,
}

/// Создаёт дочерний менеджер мониторинга для роли `prometheus_alerts`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonitoringManagerCapability;

#[async_trait]
impl MonitoringCapability for MonitoringManagerCapability {
    async fn monitoring_endpoint_created(
        &self,
        txn: &DatabaseTransaction,
        manager: &Model,
        role: &str,
    ) -> Result<(), AppError> {
        if role != PROMETHEUS_ALERTS_ROLE {
            return Ok(());
        }
        ensure_child_manager(txn, manager, ManagerKind::Monitoring, "Monitoring Manager")
            .await
            .map(|_| ())
    }

    async fn monitoring_endpoint_destroyed(
        &self,
        txn: &DatabaseTransaction,
        manager: &Model,
        role: &str,
    ) -> Result<(), AppError> {
        if role != PROMETHEUS_ALERTS_ROLE {
            return Ok(());
        }
        remove_child_manager(txn, manager, ManagerKind::Monitoring).await
    }
}

/// Создаёт дочерний infra-менеджер (KubeVirt) для роли `kubevirt`.
#[derive(Clone, Copy, Debug, Default)]
pub struct InfraManagerCapability;

#[async_trait]
impl VirtualizationCapability for InfraManagerCapability {
    async fn virtualization_endpoint_created(
        &self,
        txn: &DatabaseTransaction,
        manager: &Model,
        role: &str,
    ) -> Result<(), AppError> {
        if role != KUBEVIRT_ROLE {
            return Ok(());
        }
        ensure_child_manager(txn, manager, ManagerKind::Infra, "Virtualization Manager")
            .await
            .map(|_| ())
    }

    async fn virtualization_endpoint_destroyed(
        &self,
        txn: &DatabaseTransaction,
        manager: &Model,
        role: &str,
    ) -> Result<(), AppError> {
        if role != KUBEVIRT_ROLE {
            return Ok(());
        }
        remove_child_manager(txn, manager, ManagerKind::Infra).await
    }
}

/// Найти дочерний менеджер заданного типа.
pub async fn find_child_manager<C: ConnectionTrait>(
    db: &C,
    parent_id: &str,
    kind: ManagerKind,
) -> Result<Option<Model>, AppError> {
    let child = ManagerEntity::find()
        .filter(Column::ParentEmsId.eq(parent_id))
        .filter(Column::Kind.eq(kind))
        .one(db)
        .await?;
    Ok(child)
}

async fn ensure_child_manager(
    txn: &DatabaseTransaction,
    parent: &Model,
    kind: ManagerKind,
    suffix: &str,
) -> Result<Model, AppError> {
    if let Some(existing) = find_child_manager(txn, &parent.id, kind).await? {
        return Ok(existing);
    }

    let model = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(format!("{} {suffix}", parent.name)),
        kind: Set(kind),
        parent_ems_id: Set(Some(parent.id.clone())),
        zone: Set(parent.zone.clone()),
        created_on: Set(Utc::now().to_rfc3339()),
    };
    // Один дочерний менеджер каждого типа (уникальный индекс parent_ems_id, kind)
    let child = model.insert(txn).await.map_err(|e| {
        AppError::unique_conflict(e, || {
            format!("Дочерний менеджер {kind:?} для {} уже существует", parent.id)
        })
    })?;
    info!(
        "Создан дочерний менеджер {} ({kind:?}) для {}",
        child.id, parent.id
    );
    Ok(child)
}

async fn remove_child_manager(
    txn: &DatabaseTransaction,
    parent: &Model,
    kind: ManagerKind,
) -> Result<(), AppError> {
    let Some(child) = find_child_manager(txn, &parent.id, kind).await? else {
        return Ok(());
    };
    cascade_service::destroy_manager_in(txn, &child.id).await?;
    info!(
        "Удалён дочерний менеджер {} ({kind:?}) для {}",
        child.id, parent.id
    );
    Ok(())
}
