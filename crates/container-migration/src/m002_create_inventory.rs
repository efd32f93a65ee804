//! Миграция: таблицы инвентаря, принадлежащие менеджеру.

use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m002_create_inventory"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Архивируемые таблицы: deleted_on IS NULL у активных записей
        manager
            .create_table(
                Table::create()
                    .table(ContainerProjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerProjects::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContainerProjects::EmsId).string())
                    .col(ColumnDef::new(ContainerProjects::EmsRef).string().not_null())
                    .col(ColumnDef::new(ContainerProjects::Name).string().not_null())
                    .col(ColumnDef::new(ContainerProjects::DeletedOn).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_projects_ems_id")
                            .from(ContainerProjects::Table, ContainerProjects::EmsId)
                            .to(ExtManagementSystems::Table, ExtManagementSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContainerGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerGroups::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContainerGroups::EmsId).string())
                    .col(ColumnDef::new(ContainerGroups::EmsRef).string().not_null())
                    .col(ColumnDef::new(ContainerGroups::Name).string().not_null())
                    .col(ColumnDef::new(ContainerGroups::ContainerProjectId).string())
                    .col(ColumnDef::new(ContainerGroups::DeletedOn).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_groups_ems_id")
                            .from(ContainerGroups::Table, ContainerGroups::EmsId)
                            .to(ExtManagementSystems::Table, ExtManagementSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_groups_container_project_id")
                            .from(ContainerGroups::Table, ContainerGroups::ContainerProjectId)
                            .to(ContainerProjects::Table, ContainerProjects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Containers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Containers::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Containers::EmsId).string())
                    .col(ColumnDef::new(Containers::EmsRef).string().not_null())
                    .col(ColumnDef::new(Containers::Name).string().not_null())
                    .col(ColumnDef::new(Containers::ContainerGroupId).string())
                    .col(ColumnDef::new(Containers::DeletedOn).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_containers_ems_id")
                            .from(Containers::Table, Containers::EmsId)
                            .to(ExtManagementSystems::Table, ExtManagementSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_containers_container_group_id")
                            .from(Containers::Table, Containers::ContainerGroupId)
                            .to(ContainerGroups::Table, ContainerGroups::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContainerNodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerNodes::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContainerNodes::EmsId).string())
                    .col(ColumnDef::new(ContainerNodes::EmsRef).string().not_null())
                    .col(ColumnDef::new(ContainerNodes::Name).string().not_null())
                    .col(ColumnDef::new(ContainerNodes::DeletedOn).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_nodes_ems_id")
                            .from(ContainerNodes::Table, ContainerNodes::EmsId)
                            .to(ExtManagementSystems::Table, ExtManagementSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContainerQuotas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerQuotas::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContainerQuotas::EmsId).string())
                    .col(ColumnDef::new(ContainerQuotas::EmsRef).string().not_null())
                    .col(ColumnDef::new(ContainerQuotas::Name).string().not_null())
                    .col(ColumnDef::new(ContainerQuotas::DeletedOn).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_quotas_ems_id")
                            .from(ContainerQuotas::Table, ContainerQuotas::EmsId)
                            .to(ExtManagementSystems::Table, ExtManagementSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContainerImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerImages::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContainerImages::EmsId).string())
                    .col(ColumnDef::new(ContainerImages::EmsRef).string().not_null())
                    .col(ColumnDef::new(ContainerImages::Name).string().not_null())
                    .col(ColumnDef::new(ContainerImages::Digest).string())
                    .col(ColumnDef::new(ContainerImages::DeletedOn).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_images_ems_id")
                            .from(ContainerImages::Table, ContainerImages::EmsId)
                            .to(ExtManagementSystems::Table, ExtManagementSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Таблицы, удаляемые каскадно вместе с менеджером
        manager
            .create_table(
                Table::create()
                    .table(ContainerServices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerServices::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContainerServices::EmsId).string())
                    .col(ColumnDef::new(ContainerServices::EmsRef).string().not_null())
                    .col(ColumnDef::new(ContainerServices::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_services_ems_id")
                            .from(ContainerServices::Table, ContainerServices::EmsId)
                            .to(ExtManagementSystems::Table, ExtManagementSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContainerReplicators::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerReplicators::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContainerReplicators::EmsId).string())
                    .col(
                        ColumnDef::new(ContainerReplicators::EmsRef)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContainerReplicators::Name)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContainerReplicators::Replicas).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_replicators_ems_id")
                            .from(ContainerReplicators::Table, ContainerReplicators::EmsId)
                            .to(ExtManagementSystems::Table, ExtManagementSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContainerRoutes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerRoutes::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContainerRoutes::EmsId).string())
                    .col(ColumnDef::new(ContainerRoutes::EmsRef).string().not_null())
                    .col(ColumnDef::new(ContainerRoutes::Name).string().not_null())
                    .col(ColumnDef::new(ContainerRoutes::HostName).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_routes_ems_id")
                            .from(ContainerRoutes::Table, ContainerRoutes::EmsId)
                            .to(ExtManagementSystems::Table, ExtManagementSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContainerLimits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerLimits::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContainerLimits::EmsId).string())
                    .col(ColumnDef::new(ContainerLimits::EmsRef).string().not_null())
                    .col(ColumnDef::new(ContainerLimits::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_limits_ems_id")
                            .from(ContainerLimits::Table, ContainerLimits::EmsId)
                            .to(ExtManagementSystems::Table, ExtManagementSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContainerImageRegistries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerImageRegistries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContainerImageRegistries::EmsId).string())
                    .col(
                        ColumnDef::new(ContainerImageRegistries::EmsRef)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContainerImageRegistries::Name)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContainerImageRegistries::Host)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContainerImageRegistries::Port).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_image_registries_ems_id")
                            .from(ContainerImageRegistries::Table, ContainerImageRegistries::EmsId)
                            .to(ExtManagementSystems::Table, ExtManagementSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PersistentVolumeClaims::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PersistentVolumeClaims::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PersistentVolumeClaims::EmsId).string())
                    .col(
                        ColumnDef::new(PersistentVolumeClaims::EmsRef)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PersistentVolumeClaims::Name)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PersistentVolumeClaims::Capacity).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_persistent_volume_claims_ems_id")
                            .from(PersistentVolumeClaims::Table, PersistentVolumeClaims::EmsId)
                            .to(ExtManagementSystems::Table, ExtManagementSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContainerBuilds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerBuilds::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContainerBuilds::EmsId).string())
                    .col(ColumnDef::new(ContainerBuilds::EmsRef).string().not_null())
                    .col(ColumnDef::new(ContainerBuilds::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_builds_ems_id")
                            .from(ContainerBuilds::Table, ContainerBuilds::EmsId)
                            .to(ExtManagementSystems::Table, ExtManagementSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContainerBuildPods::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerBuildPods::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContainerBuildPods::EmsId).string())
                    .col(
                        ColumnDef::new(ContainerBuildPods::EmsRef)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContainerBuildPods::Name).string().not_null())
                    .col(ColumnDef::new(ContainerBuildPods::Phase).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_build_pods_ems_id")
                            .from(ContainerBuildPods::Table, ContainerBuildPods::EmsId)
                            .to(ExtManagementSystems::Table, ExtManagementSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContainerTemplates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerTemplates::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContainerTemplates::EmsId).string())
                    .col(
                        ColumnDef::new(ContainerTemplates::EmsRef)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContainerTemplates::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_templates_ems_id")
                            .from(ContainerTemplates::Table, ContainerTemplates::EmsId)
                            .to(ExtManagementSystems::Table, ExtManagementSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Полиморфный родитель: внешнего ключа нет
        manager
            .create_table(
                Table::create()
                    .table(PersistentVolumes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PersistentVolumes::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PersistentVolumes::ParentType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PersistentVolumes::ParentId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PersistentVolumes::EmsRef).string().not_null())
                    .col(ColumnDef::new(PersistentVolumes::Name).string().not_null())
                    .col(ColumnDef::new(PersistentVolumes::Capacity).string())
                    .to_owned(),
            )
            .await?;

        // Индексы по ems_id для выборки инвентаря менеджера
        manager
            .create_index(
                Index::create()
                    .table(ContainerProjects::Table)
                    .col(ContainerProjects::EmsId)
                    .name("idx_container_projects_ems_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerGroups::Table)
                    .col(ContainerGroups::EmsId)
                    .name("idx_container_groups_ems_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Containers::Table)
                    .col(Containers::EmsId)
                    .name("idx_containers_ems_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerNodes::Table)
                    .col(ContainerNodes::EmsId)
                    .name("idx_container_nodes_ems_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerQuotas::Table)
                    .col(ContainerQuotas::EmsId)
                    .name("idx_container_quotas_ems_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerImages::Table)
                    .col(ContainerImages::EmsId)
                    .name("idx_container_images_ems_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerServices::Table)
                    .col(ContainerServices::EmsId)
                    .name("idx_container_services_ems_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerReplicators::Table)
                    .col(ContainerReplicators::EmsId)
                    .name("idx_container_replicators_ems_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerRoutes::Table)
                    .col(ContainerRoutes::EmsId)
                    .name("idx_container_routes_ems_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerLimits::Table)
                    .col(ContainerLimits::EmsId)
                    .name("idx_container_limits_ems_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerImageRegistries::Table)
                    .col(ContainerImageRegistries::EmsId)
                    .name("idx_container_image_registries_ems_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(PersistentVolumeClaims::Table)
                    .col(PersistentVolumeClaims::EmsId)
                    .name("idx_persistent_volume_claims_ems_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerBuilds::Table)
                    .col(ContainerBuilds::EmsId)
                    .name("idx_container_builds_ems_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerBuildPods::Table)
                    .col(ContainerBuildPods::EmsId)
                    .name("idx_container_build_pods_ems_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerTemplates::Table)
                    .col(ContainerTemplates::EmsId)
                    .name("idx_container_templates_ems_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(PersistentVolumes::Table)
                    .col(PersistentVolumes::ParentType)
                    .col(PersistentVolumes::ParentId)
                    .name("idx_persistent_volumes_parent")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PersistentVolumes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerTemplates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerBuildPods::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerBuilds::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PersistentVolumeClaims::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerImageRegistries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerLimits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerRoutes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerReplicators::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerServices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerImages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerQuotas::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerNodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Containers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerProjects::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ContainerProjects {
    Table,
    Id,
    EmsId,
    EmsRef,
    Name,
    DeletedOn,
}

#[derive(Iden)]
enum ContainerGroups {
    Table,
    Id,
    EmsId,
    EmsRef,
    Name,
    ContainerProjectId,
    DeletedOn,
}

#[derive(Iden)]
enum Containers {
    Table,
    Id,
    EmsId,
    EmsRef,
    Name,
    ContainerGroupId,
    DeletedOn,
}

#[derive(Iden)]
enum ContainerNodes {
    Table,
    Id,
    EmsId,
    EmsRef,
    Name,
    DeletedOn,
}

#[derive(Iden)]
enum ContainerQuotas {
    Table,
    Id,
    EmsId,
    EmsRef,
    Name,
    DeletedOn,
}

#[derive(Iden)]
enum ContainerImages {
    Table,
    Id,
    EmsId,
    EmsRef,
    Name,
    Digest,
    DeletedOn,
}

#[derive(Iden)]
enum ContainerServices {
    Table,
    Id,
    EmsId,
    EmsRef,
    Name,
}

#[derive(Iden)]
enum ContainerReplicators {
    Table,
    Id,
    EmsId,
    EmsRef,
    Name,
    Replicas,
}

#[derive(Iden)]
enum ContainerRoutes {
    Table,
    Id,
    EmsId,
    EmsRef,
    Name,
    HostName,
}

#[derive(Iden)]
enum ContainerLimits {
    Table,
    Id,
    EmsId,
    EmsRef,
    Name,
}

#[derive(Iden)]
enum ContainerImageRegistries {
    Table,
    Id,
    EmsId,
    EmsRef,
    Name,
    Host,
    Port,
}

#[derive(Iden)]
enum PersistentVolumeClaims {
    Table,
    Id,
    EmsId,
    EmsRef,
    Name,
    Capacity,
}

#[derive(Iden)]
enum ContainerBuilds {
    Table,
    Id,
    EmsId,
    EmsRef,
    Name,
}

#[derive(Iden)]
enum ContainerBuildPods {
    Table,
    Id,
    EmsId,
    EmsRef,
    Name,
    Phase,
}

#[derive(Iden)]
enum ContainerTemplates {
    Table,
    Id,
    EmsId,
    EmsRef,
    Name,
}

#[derive(Iden)]
enum PersistentVolumes {
    Table,
    Id,
    ParentType,
    ParentId,
    EmsRef,
    Name,
    Capacity,
}

#[derive(Iden)]
enum ExtManagementSystems {
    Table,
    Id,
}
