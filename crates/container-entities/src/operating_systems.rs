//! Entity для таблицы operating_systems.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "operating_systems")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub computer_system_id: String,

    pub distribution: Option<String>,

    pub kernel_version: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::computer_systems::Entity",
        from = "Column::ComputerSystemId",
        to = "super::computer_systems::Column::Id",
        on_delete = "Restrict"
    )]
    ComputerSystem,
}

impl Related<super::computer_systems::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComputerSystem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
