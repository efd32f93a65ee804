//! Entity для таблицы endpoints.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Роль основного endpoint менеджера.
pub const DEFAULT_ROLE: &str = "default";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "endpoints")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub ems_id: String,

    /// Роль endpoint: default, kubevirt, prometheus, prometheus_alerts, ...
    pub role: String,

    pub hostname: String,

    /// Порт; None если не задан
    pub port: Option<i32>,

    /// Время создания (ISO-8601)
    pub created_on: String,
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
