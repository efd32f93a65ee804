//! Entity для таблицы container_limits (LimitRange).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "container_limits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub ems_id: Option<String>,

    pub ems_ref: String,

    pub name: String,
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
    #[sea_orm(has_many = "super::container_limit_items::Entity")]
    ContainerLimitItems,
}

impl Related<super::ext_management_systems::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExtManagementSystem.def()
    }
}

impl Related<super::container_limit_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerLimitItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
