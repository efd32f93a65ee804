//! Entity для таблицы container_service_port_configs.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "container_service_port_configs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub container_service_id: String,

    pub name: Option<String>,

    pub port: i32,

    /// Целевой порт pod'а (число или имя)
    pub target_port: Option<String>,

    pub protocol: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::container_services::Entity",
        from = "Column::ContainerServiceId",
        to = "super::container_services::Column::Id",
        on_delete = "Restrict"
    )]
    ContainerService,
}

impl Related<super::container_services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerService.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
