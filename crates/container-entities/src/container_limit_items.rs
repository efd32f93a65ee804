//! Entity для таблицы container_limit_items.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "container_limit_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub container_limit_id: String,

    /// Тип объекта: Container, Pod, PersistentVolumeClaim
    pub item_type: String,

    pub resource: String,

    pub max: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::container_limits::Entity",
        from = "Column::ContainerLimitId",
        to = "super::container_limits::Column::Id",
        on_delete = "Restrict"
    )]
    ContainerLimit,
}

impl Related<super::container_limits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerLimit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
