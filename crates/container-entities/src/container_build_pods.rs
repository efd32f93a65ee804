//! Entity для таблицы container_build_pods.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "container_build_pods")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub ems_id: Option<String>,

    pub ems_ref: String,

    pub name: String,

    /// Фаза выполнения сборки
    pub phase: Option<String>,
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
