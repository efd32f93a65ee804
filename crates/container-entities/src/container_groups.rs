//! Entity для таблицы container_groups (pod'ы).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "container_groups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Менеджер-владелец; None у осиротевших записей
    pub ems_id: Option<String>,

    /// Идентификатор объекта в источнике
    pub ems_ref: String,

    pub name: String,

    /// Проект (namespace) pod'а
    pub container_project_id: Option<String>,

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
        belongs_to = "super::container_projects::Entity",
        from = "Column::ContainerProjectId",
        to = "super::container_projects::Column::Id",
        on_delete = "Restrict"
    )]
    ContainerProject,
    #[sea_orm(has_many = "super::containers::Entity")]
    Containers,
    #[sea_orm(has_many = "super::container_volumes::Entity")]
    ContainerVolumes,
}

impl Related<super::ext_management_systems::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExtManagementSystem.def()
    }
}

impl Related<super::container_projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerProject.def()
    }
}

impl Related<super::containers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Containers.def()
    }
}

impl Related<super::container_volumes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerVolumes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Запись заархивирована (удалена из источника, но сохранена в истории).
    pub fn is_archived(&self) -> bool {
        self.deleted_on.is_some()
    }
}
