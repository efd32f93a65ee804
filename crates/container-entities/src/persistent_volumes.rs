//! Entity для таблицы persistent_volumes.
//!
//! Родитель полиморфный: пара (parent_type, parent_id). Для томов,
//! принадлежащих менеджеру, parent_type равен [`EMS_PARENT_TYPE`].
//! Внешнего ключа нет, поэтому связь с менеджером не объявлена в `Relation`.

use sea_orm::entity::prelude::*;
use sea_orm::Condition;
use serde::{Deserialize, Serialize};

/// Значение parent_type для томов менеджера.
pub const EMS_PARENT_TYPE: &str = "ExtManagementSystem";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "persistent_volumes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Тип родителя
    pub parent_type: String,

    /// Идентификатор родителя
    pub parent_id: String,

    pub ems_ref: String,

    pub name: String,

    pub capacity: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Условие выборки томов, принадлежащих менеджеру `ems_id`.
pub fn owned_by_ems(ems_id: &str) -> Condition {
    Condition::all()
        .add(Column::ParentType.eq(EMS_PARENT_TYPE))
        .add(Column::ParentId.eq(ems_id))
}
