//! Каскадное удаление менеджера и всего его инвентаря.
//!
//! База данных не каскадирует сама (внешние ключи `ON DELETE RESTRICT`),
//! поэтому каждый зависимый набор перечисляется здесь явно и удаляется в одной
//! транзакции с записью менеджера. Порядок: вложенные ресурсы, наборы all_* и
//! каскадные наборы, тома, endpoints, дочерние менеджеры, сам менеджер.

use crate::error::AppError;
use container_entities::{
    computer_systems, container_build_pods, container_builds, container_env_vars,
    container_groups, container_image_registries, container_images, container_limit_items,
    container_limits, container_nodes, container_port_configs, container_projects,
    container_quota_items, container_quota_scopes, container_quotas, container_replicators,
    container_routes, container_service_port_configs, container_services,
    container_template_parameters, container_templates, container_volumes, containers, endpoints,
    ext_management_systems, hardwares, operating_systems, persistent_volume_claims,
    persistent_volumes, security_contexts,
};
use sea_orm::sea_query::{Query, SelectStatement, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityName, EntityTrait,
    QueryFilter, TransactionTrait,
};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Итог каскадного удаления.
#[derive(Debug, Default, Clone, PartialEq, serde::Serialize)]
pub struct DestroyReport {
    /// Удалённые менеджеры: сначала дочерние, последним корневой
    pub managers: Vec<String>,
    /// Число удалённых строк по таблицам
    pub removed: BTreeMap<String, u64>,
}

impl DestroyReport {
    fn record(&mut self, table: &str, rows: u64) {
        *self.removed.entry(table.to_string()).or_default() += rows;
    }

    /// Удалено строк в таблице.
    pub fn removed_from(&self, table: &str) -> u64 {
        self.removed.get(table).copied().unwrap_or(0)
    }

    /// Всего удалено строк, включая записи менеджеров.
    pub fn total(&self) -> u64 {
        self.removed.values().sum()
    }
}

/// Удалить менеджер (любого типа) со всеми зависимыми данными.
///
/// Всё удаляется в одной транзакции; при любой ошибке транзакция откатывается
/// и возвращается [`AppError::ManagerDeletion`].
pub async fn destroy_manager(db: &DatabaseConnection, id: &str) -> Result<DestroyReport, AppError> {
    let txn = db.begin().await.map_err(|e| deletion_error(id, e))?;

    match destroy_manager_in(&txn, id).await {
        Ok(report) => {
            txn.commit().await.map_err(|e| deletion_error(id, e))?;
            info!(
                "Менеджер {id} удалён: {} менеджеров, {} строк",
                report.managers.len(),
                report.total()
            );
            Ok(report)
        }
        Err(e) => {
            warn!("Удаление менеджера {id} откачено: {e}");
            if let Err(rollback) = txn.rollback().await {
                warn!("Ошибка отката транзакции: {rollback}");
            }
            Err(e)
        }
    }
}

/// Удалить менеджер внутри транзакции вызывающего.
///
/// Фиксация и откат остаются за вызывающим: при ошибке часть строк уже может
/// быть удалена в `txn`.
pub async fn destroy_manager_in(
    txn: &DatabaseTransaction,
    id: &str,
) -> Result<DestroyReport, AppError> {
    if ext_management_systems::Entity::find_by_id(id)
        .one(txn)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!("Менеджер не найден: {id}")));
    }

    let mut report = DestroyReport::default();
    destroy_tree(txn, id, &mut report)
        .await
        .map_err(|e| deletion_error(id, e))?;
    Ok(report)
}

fn deletion_error(id: &str, source: DbErr) -> AppError {
    AppError::ManagerDeletion {
        id: id.to_string(),
        source,
    }
}

/// Удалить менеджер и всех его потомков: от листьев к корню.
async fn destroy_tree(
    txn: &DatabaseTransaction,
    root_id: &str,
    report: &mut DestroyReport,
) -> Result<(), DbErr> {
    // Обход в ширину по parent_ems_id
    let mut order = vec![root_id.to_string()];
    let mut cursor = 0;
    while cursor < order.len() {
        let children = ext_management_systems::Entity::find()
            .filter(ext_management_systems::Column::ParentEmsId.eq(order[cursor].as_str()))
            .all(txn)
            .await?;
        for child in children {
            if !order.contains(&child.id) {
                order.push(child.id);
            }
        }
        cursor += 1;
    }

    for id in order.iter().rev() {
        destroy_one(txn, id, report).await?;
    }
    Ok(())
}

async fn destroy_one(
    txn: &DatabaseTransaction,
    ems_id: &str,
    report: &mut DestroyReport,
) -> Result<(), DbErr> {
    debug!("Каскадное удаление менеджера {ems_id}");

    // Вложенные ресурсы узлов
    let nodes = owned_ids::<container_nodes::Entity>(
        container_nodes::Column::Id,
        container_nodes::Column::EmsId,
        ems_id,
    );
    let systems = Query::select()
        .column(computer_systems::Column::Id)
        .from(computer_systems::Entity)
        .and_where(computer_systems::Column::ContainerNodeId.in_subquery(nodes.clone()))
        .to_owned();
    purge::<hardwares::Entity>(
        txn,
        hardwares::Column::ComputerSystemId.in_subquery(systems.clone()),
        report,
    )
    .await?;
    purge::<operating_systems::Entity>(
        txn,
        operating_systems::Column::ComputerSystemId.in_subquery(systems),
        report,
    )
    .await?;
    purge::<computer_systems::Entity>(
        txn,
        computer_systems::Column::ContainerNodeId.in_subquery(nodes),
        report,
    )
    .await?;

    // Вложенные ресурсы pod'ов и контейнеров
    let groups = owned_ids::<container_groups::Entity>(
        container_groups::Column::Id,
        container_groups::Column::EmsId,
        ems_id,
    );
    purge::<container_volumes::Entity>(
        txn,
        container_volumes::Column::ContainerGroupId.in_subquery(groups),
        report,
    )
    .await?;
    let containers_of = owned_ids::<containers::Entity>(
        containers::Column::Id,
        containers::Column::EmsId,
        ems_id,
    );
    purge::<container_port_configs::Entity>(
        txn,
        container_port_configs::Column::ContainerId.in_subquery(containers_of.clone()),
        report,
    )
    .await?;
    purge::<container_env_vars::Entity>(
        txn,
        container_env_vars::Column::ContainerId.in_subquery(containers_of.clone()),
        report,
    )
    .await?;
    purge::<security_contexts::Entity>(
        txn,
        security_contexts::Column::ContainerId.in_subquery(containers_of),
        report,
    )
    .await?;

    // Вложенные ресурсы сервисов, квот, лимитов и шаблонов
    purge::<container_service_port_configs::Entity>(
        txn,
        container_service_port_configs::Column::ContainerServiceId.in_subquery(
            owned_ids::<container_services::Entity>(
                container_services::Column::Id,
                container_services::Column::EmsId,
                ems_id,
            ),
        ),
        report,
    )
    .await?;
    let quotas = owned_ids::<container_quotas::Entity>(
        container_quotas::Column::Id,
        container_quotas::Column::EmsId,
        ems_id,
    );
    purge::<container_quota_scopes::Entity>(
        txn,
        container_quota_scopes::Column::ContainerQuotaId.in_subquery(quotas.clone()),
        report,
    )
    .await?;
    purge::<container_quota_items::Entity>(
        txn,
        container_quota_items::Column::ContainerQuotaId.in_subquery(quotas),
        report,
    )
    .await?;
    purge::<container_limit_items::Entity>(
        txn,
        container_limit_items::Column::ContainerLimitId.in_subquery(
            owned_ids::<container_limits::Entity>(
                container_limits::Column::Id,
                container_limits::Column::EmsId,
                ems_id,
            ),
        ),
        report,
    )
    .await?;
    purge::<container_template_parameters::Entity>(
        txn,
        container_template_parameters::Column::ContainerTemplateId.in_subquery(
            owned_ids::<container_templates::Entity>(
                container_templates::Column::Id,
                container_templates::Column::EmsId,
                ems_id,
            ),
        ),
        report,
    )
    .await?;

    // all_*: активные и архивные записи. Контейнеры раньше pod'ов, pod'ы раньше проектов.
    purge::<containers::Entity>(txn, containers::Column::EmsId.eq(ems_id), report).await?;
    purge::<container_groups::Entity>(txn, container_groups::Column::EmsId.eq(ems_id), report)
        .await?;
    purge::<container_projects::Entity>(txn, container_projects::Column::EmsId.eq(ems_id), report)
        .await?;
    purge::<container_images::Entity>(txn, container_images::Column::EmsId.eq(ems_id), report)
        .await?;
    purge::<container_nodes::Entity>(txn, container_nodes::Column::EmsId.eq(ems_id), report)
        .await?;
    purge::<container_quotas::Entity>(txn, container_quotas::Column::EmsId.eq(ems_id), report)
        .await?;

    // Каскадные наборы
    purge::<container_services::Entity>(txn, container_services::Column::EmsId.eq(ems_id), report)
        .await?;
    purge::<container_replicators::Entity>(
        txn,
        container_replicators::Column::EmsId.eq(ems_id),
        report,
    )
    .await?;
    purge::<container_routes::Entity>(txn, container_routes::Column::EmsId.eq(ems_id), report)
        .await?;
    purge::<container_limits::Entity>(txn, container_limits::Column::EmsId.eq(ems_id), report)
        .await?;
    purge::<container_image_registries::Entity>(
        txn,
        container_image_registries::Column::EmsId.eq(ems_id),
        report,
    )
    .await?;
    purge::<persistent_volume_claims::Entity>(
        txn,
        persistent_volume_claims::Column::EmsId.eq(ems_id),
        report,
    )
    .await?;
    purge::<container_builds::Entity>(txn, container_builds::Column::EmsId.eq(ems_id), report)
        .await?;
    purge::<container_build_pods::Entity>(
        txn,
        container_build_pods::Column::EmsId.eq(ems_id),
        report,
    )
    .await?;
    purge::<container_templates::Entity>(
        txn,
        container_templates::Column::EmsId.eq(ems_id),
        report,
    )
    .await?;

    // Полиморфный родитель
    let volumes = persistent_volumes::Entity::delete_many()
        .filter(persistent_volumes::owned_by_ems(ems_id))
        .exec(txn)
        .await?;
    report.record(
        persistent_volumes::Entity.table_name(),
        volumes.rows_affected,
    );

    purge::<endpoints::Entity>(txn, endpoints::Column::EmsId.eq(ems_id), report).await?;
    purge::<ext_management_systems::Entity>(
        txn,
        ext_management_systems::Column::Id.eq(ems_id),
        report,
    )
    .await?;
    report.managers.push(ems_id.to_string());
    Ok(())
}

/// Подзапрос id строк таблицы, принадлежащих менеджеру.
fn owned_ids<E: EntityTrait>(
    id: E::Column,
    ems_column: E::Column,
    ems_id: &str,
) -> SelectStatement {
    Query::select()
        .column(id)
        .from(E::default())
        .and_where(ems_column.eq(ems_id))
        .to_owned()
}

async fn purge<E: EntityTrait>(
    txn: &DatabaseTransaction,
    condition: SimpleExpr,
    report: &mut DestroyReport,
) -> Result<(), DbErr> {
    let entity = E::default();
    let result = E::delete_many().filter(condition).exec(txn).await?;
    debug!(
        "{}: удалено {} строк",
        entity.table_name(),
        result.rows_affected
    );
    report.record(entity.table_name(), result.rows_affected);
    Ok(())
}
