//! Entity для таблицы container_images.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "container_images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Менеджер-владелец; None у осиротевших записей
    pub ems_id: Option<String>,

    /// Идентификатор объекта в источнике
    pub ems_ref: String,

    pub name: String,

    /// Digest образа
    pub digest: Option<String>,

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
}

impl Related<super::ext_management_systems::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExtManagementSystem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Запись заархивирована (удалена из источника, но сохранена в истории).
    pub fn is_archived(&self) -> bool {
        self.deleted_on.is_some()
    }
}
