//! Entity для таблицы container_template_parameters.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "container_template_parameters")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub container_template_id: String,

    pub name: String,

    pub value: Option<String>,

    pub required: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::container_templates::Entity",
        from = "Column::ContainerTemplateId",
        to = "super::container_templates::Column::Id",
        on_delete = "Restrict"
    )]
    ContainerTemplate,
}

impl Related<super::container_templates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContainerTemplate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
