//! Архивация записей инвентаря (deleted_on).
//!
//! Архивную запись не видно в активных связях менеджера, но она по-прежнему
//! принадлежит ему и удаляется каскадно через наборы all_*.

use crate::error::AppError;
use chrono::Utc;
use container_entities::{
    container_groups, container_images, container_nodes, container_projects, container_quotas,
    containers,
};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Таблицы с архивацией.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Archivable {
    ContainerNodes,
    ContainerGroups,
    Containers,
    ContainerProjects,
    ContainerQuotas,
    ContainerImages,
}

impl std::str::FromStr for Archivable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "container_nodes" => Ok(Archivable::ContainerNodes),
            "container_groups" => Ok(Archivable::ContainerGroups),
            "containers" => Ok(Archivable::Containers),
            "container_projects" => Ok(Archivable::ContainerProjects),
            "container_quotas" => Ok(Archivable::ContainerQuotas),
            "container_images" => Ok(Archivable::ContainerImages),
            other => Err(format!("Таблица {other} не поддерживает архивацию")),
        }
    }
}

/// Заархивировать запись.
pub async fn archive(db: &DatabaseConnection, table: Archivable, id: &str) -> Result<(), AppError> {
    set_deleted_on(db, table, id, Some(Utc::now().to_rfc3339())).await
}

/// Вернуть запись в активные.
pub async fn unarchive(
    db: &DatabaseConnection,
    table: Archivable,
    id: &str,
) -> Result<(), AppError> {
    set_deleted_on(db, table, id, None).await
}

async fn set_deleted_on(
    db: &DatabaseConnection,
    table: Archivable,
    id: &str,
    value: Option<String>,
) -> Result<(), AppError> {
    let rows = match table {
        Archivable::ContainerNodes => {
            container_nodes::Entity::update_many()
                .col_expr(container_nodes::Column::DeletedOn, Expr::value(value))
                .filter(container_nodes::Column::Id.eq(id))
                .exec(db)
                .await?
        }
        Archivable::ContainerGroups => {
            container_groups::Entity::update_many()
                .col_expr(container_groups::Column::DeletedOn, Expr::value(value))
                .filter(container_groups::Column::Id.eq(id))
                .exec(db)
                .await?
        }
        Archivable::Containers => {
            containers::Entity::update_many()
                .col_expr(containers::Column::DeletedOn, Expr::value(value))
                .filter(containers::Column::Id.eq(id))
                .exec(db)
                .await?
        }
        Archivable::ContainerProjects => {
            container_projects::Entity::update_many()
                .col_expr(container_projects::Column::DeletedOn, Expr::value(value))
                .filter(container_projects::Column::Id.eq(id))
                .exec(db)
                .await?
        }
        Archivable::ContainerQuotas => {
            container_quotas::Entity::update_many()
                .col_expr(container_quotas::Column::DeletedOn, Expr::value(value))
                .filter(container_quotas::Column::Id.eq(id))
                .exec(db)
                .await?
        }
        Archivable::ContainerImages => {
            container_images::Entity::update_many()
                .col_expr(container_images::Column::DeletedOn, Expr::value(value))
                .filter(container_images::Column::Id.eq(id))
                .exec(db)
                .await?
        }
    }
    .rows_affected;

    if rows == 0 {
        return Err(AppError::NotFound(format!("Запись не найдена: {id}")));
    }
    Ok(())
}
