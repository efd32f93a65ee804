//! Entity для таблицы container_quota_items.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "container_quota_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub container_quota_id: String,

    pub resource: String,

    /// Жёсткий лимит в исходной записи (например 4Gi)
    pub quota_hard: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::container_quotas::Entity",
        from = "Column::ContainerQuotaId",
        to = "super::container_quotas::Column::Id",
        on_delete = "Restrict"
    )]
    ContainerQuota,
}

impl Related<super::container_quotas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerQuota.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
