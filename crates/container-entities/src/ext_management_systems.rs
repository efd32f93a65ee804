//! Entity для таблицы ext_management_systems (менеджеры).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ext_management_systems")]
pub struct Model {
    /// UUID первичного ключа
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Имя менеджера, заданное оператором
    pub name: String,

    /// Тип менеджера
    pub kind: ManagerKind,

    /// Родительский менеджер (для дочерних infra/monitoring менеджеров)
    pub parent_ems_id: Option<String>,

    /// Зона
    pub zone: Option<String>,

    /// Время регистрации (ISO-8601)
    pub created_on: String,
}

/// Тип менеджера.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum ManagerKind {
    #[sea_orm(string_value = "container")]
    Container,
    #[sea_orm(string_value = "infra")]
    Infra,
    #[sea_orm(string_value = "monitoring")]
    Monitoring,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentEmsId",
        to = "Column::Id",
        on_delete = "Restrict"
    )]
    Parent,
    #[sea_orm(has_many = "super::endpoints::Entity")]
    Endpoints,
    #[sea_orm(has_many = "super::container_nodes::Entity")]
    ContainerNodes,
    #[sea_orm(has_many = "super::container_groups::Entity")]
    ContainerGroups,
    #[sea_orm(has_many = "super::containers::Entity")]
    Containers,
    #[sea_orm(has_many = "super::container_projects::Entity")]
    ContainerProjects,
    #[sea_orm(has_many = "super::container_quotas::Entity")]
    ContainerQuotas,
    #[sea_orm(has_many = "super::container_images::Entity")]
    ContainerImages,
    #[sea_orm(has_many = "super::container_services::Entity")]
    ContainerServices,
    #[sea_orm(has_many = "super::container_replicators::Entity")]
    ContainerReplicators,
    #[sea_orm(has_many = "super::container_routes::Entity")]
    ContainerRoutes,
    #[sea_orm(has_many = "super::container_limits::Entity")]
    ContainerLimits,
    #[sea_orm(has_many = "super::container_image_registries::Entity")]
    ContainerImageRegistries,
    #[sea_orm(has_many = "super::persistent_volume_claims::Entity")]
    PersistentVolumeClaims,
    #[sea_orm(has_many = "super::container_builds::Entity")]
    ContainerBuilds,
    #[sea_orm(has_many = "super::container_build_pods::Entity")]
    ContainerBuildPods,
    #[sea_orm(has_many = "super::container_templates::Entity")]
    ContainerTemplates,
}

impl Related<super::endpoints::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Endpoints.def()
    }
}

impl Related<super::container_nodes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerNodes.def()
    }
}

impl Related<super::container_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerGroups.def()
    }
}

impl Related<super::containers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Containers.def()
    }
}

impl Related<super::container_projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerProjects.def()
    }
}

impl Related<super::container_quotas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerQuotas.def()
    }
}

impl Related<super::container_images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerImages.def()
    }
}

impl Related<super::container_services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerServices.def()
    }
}

impl Related<super::container_replicators::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerReplicators.def()
    }
}

impl Related<super::container_routes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerRoutes.def()
    }
}

impl Related<super::container_limits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerLimits.def()
    }
}

impl Related<super::container_image_registries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerImageRegistries.def()
    }
}

impl Related<super::persistent_volume_claims::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersistentVolumeClaims.def()
    }
}

impl Related<super::container_builds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerBuilds.def()
    }
}

impl Related<super::container_build_pods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerBuildPods.def()
    }
}

impl Related<super::container_templates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerTemplates.def()
    }
}

/// Дочерние менеджеры (infra, monitoring) через parent_ems_id.
pub struct ChildManagers;

impl Linked for ChildManagers {
    type FromEntity = Entity;
    type ToEntity = Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![Relation::Parent.def().rev()]
    }
}

impl ActiveModelBehavior for ActiveModel {}
