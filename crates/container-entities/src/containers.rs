//! Entity для таблицы containers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "containers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Менеджер-владелец; None у осиротевших записей
    pub ems_id: Option<String>,

    /// Идентификатор объекта в источнике
    pub ems_ref: String,

    pub name: String,

    /// Pod, в котором запущен контейнер
    pub container_group_id: Option<String>,

    /// Время архивации (ISO-8601); None у активных записей
    pub deleted_on: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ext_management_systems::Entity",
        from = "Column::EmsId",
        to = "super::ext_management_systems::Column::Id",
        on_delete = "Restrict"
    )]
    ExtManagementSystem,
    #[sea_orm(
        belongs_to = "super::container_groups::Entity",
        from = "Column::ContainerGroupId",
        to = "super::container_groups::Column::Id",
        on_delete = "Restrict"
    )]
    ContainerGroup,
    #[sea_orm(has_many = "super::container_port_configs::Entity")]
    ContainerPortConfigs,
    #[sea_orm(has_many = "super::container_env_vars::Entity")]
    ContainerEnvVars,
    #[sea_orm(has_many = "super::security_contexts::Entity")]
    SecurityContexts,
}

impl Related<super::ext_management_systems::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExtManagementSystem.def()
    }
}

impl Related<super::container_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerGroup.def()
    }
}

impl Related<super::container_port_configs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerPortConfigs.def()
    }
}

impl Related<super::container_env_vars::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerEnvVars.def()
    }
}

impl Related<super::security_contexts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SecurityContexts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Запись заархивирована (удалена из источника, но сохранена в истории).
    pub fn is_archived(&self) -> bool {
        self.deleted_on.is_some()
    }
}
