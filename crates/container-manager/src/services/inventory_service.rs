//! Чтение инвентаря менеджера по связям каталога.
//!
//! Производные (through) связи являются чистыми join'ами: они наследуют область
//! видимости промежуточной связи и ничего не создают.

use crate::error::AppError;
use crate::schema::Relationship;
use container_entities::ext_management_systems::{self, ManagerKind};
use container_entities::{
    computer_systems, container_build_pods, container_builds, container_env_vars,
    container_groups, container_image_registries, container_images, container_limit_items,
    container_limits, container_nodes, container_port_configs, container_projects,
    container_quota_items, container_quota_scopes, container_quotas, container_replicators,
    container_routes, container_service_port_configs, container_services,
    container_template_parameters, container_templates, container_volumes, containers, hardwares,
    operating_systems, persistent_volume_claims, persistent_volumes, security_contexts,
};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QuerySelect, RelationTrait, Select,
};
use serde_json::Value as JsonValue;

/// Строки связи в виде JSON.
pub async fn load(
    db: &DatabaseConnection,
    ems_id: &str,
    relationship: Relationship,
) -> Result<Vec<JsonValue>, AppError> {
    Ok(fetch(db, ems_id, relationship).await?)
}

/// Число строк связи.
pub async fn count(
    db: &DatabaseConnection,
    ems_id: &str,
    relationship: Relationship,
) -> Result<u64, AppError> {
    Ok(fetch(db, ems_id, relationship).await?)
}

/// Размеры всех связей менеджера, в порядке каталога.
pub async fn summary(
    db: &DatabaseConnection,
    ems_id: &str,
) -> Result<Vec<(Relationship, u64)>, AppError> {
    let mut out = Vec::new();
    for relationship in Relationship::iter() {
        out.push((relationship, count(db, ems_id, relationship).await?));
    }
    Ok(out)
}

/// Результат чтения связи: строки или их число.
trait Output: Sized {
    async fn read<E>(db: &DatabaseConnection, select: Select<E>) -> Result<Self, DbErr>
    where
        E: EntityTrait,
        E::Model: Sync;
}

impl Output for Vec<JsonValue> {
    async fn read<E>(db: &DatabaseConnection, select: Select<E>) -> Result<Self, DbErr>
    where
        E: EntityTrait,
        E::Model: Sync,
    {
        select.into_json().all(db).await
    }
}

impl Output for u64 {
    async fn read<E>(db: &DatabaseConnection, select: Select<E>) -> Result<Self, DbErr>
    where
        E: EntityTrait,
        E::Model: Sync,
    {
        select.count(db).await
    }
}

async fn fetch<O: Output>(
    db: &DatabaseConnection,
    ems_id: &str,
    relationship: Relationship,
) -> Result<O, DbErr> {
    use Relationship as R;

    let fetched = match relationship {
        // Только активные записи
        R::ContainerNodes => {
            O::read(
                db,
                container_nodes::Entity::find()
                    .filter(container_nodes::Column::EmsId.eq(ems_id))
                    .filter(container_nodes::Column::DeletedOn.is_null()),
            )
            .await?
        }
        R::ContainerGroups => {
            O::read(
                db,
                container_groups::Entity::find()
                    .filter(container_groups::Column::EmsId.eq(ems_id))
                    .filter(container_groups::Column::DeletedOn.is_null()),
            )
            .await?
        }
        R::Containers => {
            O::read(
                db,
                containers::Entity::find()
                    .filter(containers::Column::EmsId.eq(ems_id))
                    .filter(containers::Column::DeletedOn.is_null()),
            )
            .await?
        }
        R::ContainerProjects => {
            O::read(
                db,
                container_projects::Entity::find()
                    .filter(container_projects::Column::EmsId.eq(ems_id))
                    .filter(container_projects::Column::DeletedOn.is_null()),
            )
            .await?
        }
        R::ContainerQuotas => {
            O::read(
                db,
                container_quotas::Entity::find()
                    .filter(container_quotas::Column::EmsId.eq(ems_id))
                    .filter(container_quotas::Column::DeletedOn.is_null()),
            )
            .await?
        }
        R::ContainerImages => {
            O::read(
                db,
                container_images::Entity::find()
                    .filter(container_images::Column::EmsId.eq(ems_id))
                    .filter(container_images::Column::DeletedOn.is_null()),
            )
            .await?
        }

        // Все записи, включая архивные
        R::AllContainerNodes => {
            O::read(
                db,
                container_nodes::Entity::find().filter(container_nodes::Column::EmsId.eq(ems_id)),
            )
            .await?
        }
        R::AllContainerGroups => {
            O::read(
                db,
                container_groups::Entity::find()
                    .filter(container_groups::Column::EmsId.eq(ems_id)),
            )
            .await?
        }
        R::AllContainers => {
            O::read(
                db,
                containers::Entity::find().filter(containers::Column::EmsId.eq(ems_id)),
            )
            .await?
        }
        R::AllContainerProjects => {
            O::read(
                db,
                container_projects::Entity::find()
                    .filter(container_projects::Column::EmsId.eq(ems_id)),
            )
            .await?
        }
        R::AllContainerQuotas => {
            O::read(
                db,
                container_quotas::Entity::find()
                    .filter(container_quotas::Column::EmsId.eq(ems_id)),
            )
            .await?
        }
        R::AllContainerImages => {
            O::read(
                db,
                container_images::Entity::find()
                    .filter(container_images::Column::EmsId.eq(ems_id)),
            )
            .await?
        }
        R::ContainerServices => {
            O::read(
                db,
                container_services::Entity::find()
                    .filter(container_services::Column::EmsId.eq(ems_id)),
            )
            .await?
        }
        R::ContainerReplicators => {
            O::read(
                db,
                container_replicators::Entity::find()
                    .filter(container_replicators::Column::EmsId.eq(ems_id)),
            )
            .await?
        }
        R::ContainerRoutes => {
            O::read(
                db,
                container_routes::Entity::find()
                    .filter(container_routes::Column::EmsId.eq(ems_id)),
            )
            .await?
        }
        R::ContainerLimits => {
            O::read(
                db,
                container_limits::Entity::find()
                    .filter(container_limits::Column::EmsId.eq(ems_id)),
            )
            .await?
        }
        R::ContainerImageRegistries => {
            O::read(
                db,
                container_image_registries::Entity::find()
                    .filter(container_image_registries::Column::EmsId.eq(ems_id)),
            )
            .await?
        }
        R::PersistentVolumeClaims => {
            O::read(
                db,
                persistent_volume_claims::Entity::find()
                    .filter(persistent_volume_claims::Column::EmsId.eq(ems_id)),
            )
            .await?
        }
        R::ContainerBuilds => {
            O::read(
                db,
                container_builds::Entity::find()
                    .filter(container_builds::Column::EmsId.eq(ems_id)),
            )
            .await?
        }
        R::ContainerBuildPods => {
            O::read(
                db,
                container_build_pods::Entity::find()
                    .filter(container_build_pods::Column::EmsId.eq(ems_id)),
            )
            .await?
        }
        R::ContainerTemplates => {
            O::read(
                db,
                container_templates::Entity::find()
                    .filter(container_templates::Column::EmsId.eq(ems_id)),
            )
            .await?
        }
        R::PersistentVolumes => {
            O::read(
                db,
                persistent_volumes::Entity::find()
                    .filter(persistent_volumes::owned_by_ems(ems_id)),
            )
            .await?
        }
        R::InfraManager => {
            O::read(
                db,
                ext_management_systems::Entity::find()
                    .filter(ext_management_systems::Column::ParentEmsId.eq(ems_id))
                    .filter(ext_management_systems::Column::Kind.eq(ManagerKind::Infra)),
            )
            .await?
        }

        // Производные связи через активные узлы
        R::ComputerSystems => {
            O::read(
                db,
                computer_systems::Entity::find()
                    .inner_join(container_nodes::Entity)
                    .filter(container_nodes::Column::EmsId.eq(ems_id))
                    .filter(container_nodes::Column::DeletedOn.is_null()),
            )
            .await?
        }
        R::ComputerSystemHardwares => {
            O::read(
                db,
                hardwares::Entity::find()
                    .inner_join(computer_systems::Entity)
                    .join(
                        JoinType::InnerJoin,
                        computer_systems::Relation::ContainerNode.def(),
                    )
                    .filter(container_nodes::Column::EmsId.eq(ems_id))
                    .filter(container_nodes::Column::DeletedOn.is_null()),
            )
            .await?
        }
        R::ComputerSystemOperatingSystems => {
            O::read(
                db,
                operating_systems::Entity::find()
                    .inner_join(computer_systems::Entity)
                    .join(
                        JoinType::InnerJoin,
                        computer_systems::Relation::ContainerNode.def(),
                    )
                    .filter(container_nodes::Column::EmsId.eq(ems_id))
                    .filter(container_nodes::Column::DeletedOn.is_null()),
            )
            .await?
        }

        // Через активные pod'ы и контейнеры
        R::ContainerVolumes => {
            O::read(
                db,
                container_volumes::Entity::find()
                    .inner_join(container_groups::Entity)
                    .filter(container_groups::Column::EmsId.eq(ems_id))
                    .filter(container_groups::Column::DeletedOn.is_null()),
            )
            .await?
        }
        R::ContainerPortConfigs => {
            O::read(
                db,
                container_port_configs::Entity::find()
                    .inner_join(containers::Entity)
                    .filter(containers::Column::EmsId.eq(ems_id))
                    .filter(containers::Column::DeletedOn.is_null()),
            )
            .await?
        }
        R::ContainerEnvVars => {
            O::read(
                db,
                container_env_vars::Entity::find()
                    .inner_join(containers::Entity)
                    .filter(containers::Column::EmsId.eq(ems_id))
                    .filter(containers::Column::DeletedOn.is_null()),
            )
            .await?
        }
        R::SecurityContexts => {
            O::read(
                db,
                security_contexts::Entity::find()
                    .inner_join(containers::Entity)
                    .filter(containers::Column::EmsId.eq(ems_id))
                    .filter(containers::Column::DeletedOn.is_null()),
            )
            .await?
        }

        // Через активные квоты
        R::ContainerQuotaScopes => {
            O::read(
                db,
                container_quota_scopes::Entity::find()
                    .inner_join(container_quotas::Entity)
                    .filter(container_quotas::Column::EmsId.eq(ems_id))
                    .filter(container_quotas::Column::DeletedOn.is_null()),
            )
            .await?
        }
        R::ContainerQuotaItems => {
            O::read(
                db,
                container_quota_items::Entity::find()
                    .inner_join(container_quotas::Entity)
                    .filter(container_quotas::Column::EmsId.eq(ems_id))
                    .filter(container_quotas::Column::DeletedOn.is_null()),
            )
            .await?
        }

        // Через каскадные наборы (без архивации)
        R::ContainerServicePortConfigs => {
            O::read(
                db,
                container_service_port_configs::Entity::find()
                    .inner_join(container_services::Entity)
                    .filter(container_services::Column::EmsId.eq(ems_id)),
            )
            .await?
        }
        R::ContainerLimitItems => {
            O::read(
                db,
                container_limit_items::Entity::find()
                    .inner_join(container_limits::Entity)
                    .filter(container_limits::Column::EmsId.eq(ems_id)),
            )
            .await?
        }
        R::ContainerTemplateParameters => {
            O::read(
                db,
                container_template_parameters::Entity::find()
                    .inner_join(container_templates::Entity)
                    .filter(container_templates::Column::EmsId.eq(ems_id)),
            )
            .await?
        }
    };
    Ok(fetched)
}
