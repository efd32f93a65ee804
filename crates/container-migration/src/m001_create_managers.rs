//! Миграция: таблицы менеджеров и их endpoints.

use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m001_create_managers"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ExtManagementSystems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExtManagementSystems::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ExtManagementSystems::Name)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExtManagementSystems::Kind)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ExtManagementSystems::ParentEmsId).string())
                    .col(ColumnDef::new(ExtManagementSystems::Zone).string())
                    .col(
                        ColumnDef::new(ExtManagementSystems::CreatedOn)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ext_management_systems_parent_ems_id")
                            .from(ExtManagementSystems::Table, ExtManagementSystems::ParentEmsId)
                            .to(ExtManagementSystems::Table, ExtManagementSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Endpoints::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Endpoints::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Endpoints::EmsId).string().not_null())
                    .col(ColumnDef::new(Endpoints::Role).string().not_null())
                    .col(ColumnDef::new(Endpoints::Hostname).string().not_null())
                    .col(ColumnDef::new(Endpoints::Port).integer())
                    .col(ColumnDef::new(Endpoints::CreatedOn).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_endpoints_ems_id")
                            .from(Endpoints::Table, Endpoints::EmsId)
                            .to(ExtManagementSystems::Table, ExtManagementSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Не больше одного дочернего менеджера каждого типа; у корневых
        // менеджеров parent_ems_id равен NULL и под ограничение не попадает
        manager
            .create_index(
                Index::create()
                    .table(ExtManagementSystems::Table)
                    .col(ExtManagementSystems::ParentEmsId)
                    .col(ExtManagementSystems::Kind)
                    .name("idx_ext_management_systems_parent_ems_id_kind")
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ExtManagementSystems::Table)
                    .col(ExtManagementSystems::Name)
                    .col(ExtManagementSystems::Kind)
                    .name("idx_ext_management_systems_name_kind")
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Один endpoint каждой роли на менеджер
        manager
            .create_index(
                Index::create()
                    .table(Endpoints::Table)
                    .col(Endpoints::EmsId)
                    .col(Endpoints::Role)
                    .name("idx_endpoints_ems_id_role")
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Endpoints::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExtManagementSystems::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ExtManagementSystems {
    Table,
    Id,
    Name,
    Kind,
    ParentEmsId,
    Zone,
    CreatedOn,
}

#[derive(Iden)]
enum Endpoints {
    Table,
    Id,
    EmsId,
    Role,
    Hostname,
    Port,
    CreatedOn,
}
