//! Entity для таблицы computer_systems (система узла).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "computer_systems")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub container_node_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::container_nodes::Entity",
        from = "Column::ContainerNodeId",
        to = "super::container_nodes::Column::Id",
        on_delete = "Restrict"
    )]
    ContainerNode,
    #[sea_orm(has_many = "super::hardwares::Entity")]
    Hardwares,
    #[sea_orm(has_many = "super::operating_systems::Entity")]
    OperatingSystems,
}

impl Related<super::container_nodes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerNode.def()
    }
}

impl Related<super::hardwares::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hardwares.def()
    }
}

impl Related<super::operating_systems::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OperatingSystems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
