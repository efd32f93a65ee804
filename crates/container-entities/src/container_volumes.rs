//! Entity для таблицы container_volumes (тома pod'а).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "container_volumes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub container_group_id: String,

    pub name: String,

    /// Имя PVC, если том смонтирован из claim
    pub claim_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::container_groups::Entity",
        from = "Column::ContainerGroupId",
        to = "super::container_groups::Column::Id",
        on_delete = "Restrict"
    )]
    ContainerGroup,
}

impl Related<super::container_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
