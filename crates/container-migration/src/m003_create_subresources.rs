//! Миграция: вложенные ресурсы инвентаря (доступны через связи through).

use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m003_create_subresources"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ComputerSystems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ComputerSystems::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ComputerSystems::ContainerNodeId)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_computer_systems_container_node_id")
                            .from(ComputerSystems::Table, ComputerSystems::ContainerNodeId)
                            .to(ContainerNodes::Table, ContainerNodes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Hardwares::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Hardwares::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Hardwares::ComputerSystemId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Hardwares::CpuTotalCores).integer())
                    .col(ColumnDef::new(Hardwares::MemoryMb).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_hardwares_computer_system_id")
                            .from(Hardwares::Table, Hardwares::ComputerSystemId)
                            .to(ComputerSystems::Table, ComputerSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OperatingSystems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OperatingSystems::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OperatingSystems::ComputerSystemId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OperatingSystems::Distribution).string())
                    .col(ColumnDef::new(OperatingSystems::KernelVersion).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_operating_systems_computer_system_id")
                            .from(OperatingSystems::Table, OperatingSystems::ComputerSystemId)
                            .to(ComputerSystems::Table, ComputerSystems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContainerVolumes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerVolumes::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContainerVolumes::ContainerGroupId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContainerVolumes::Name).string().not_null())
                    .col(ColumnDef::new(ContainerVolumes::ClaimName).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_volumes_container_group_id")
                            .from(ContainerVolumes::Table, ContainerVolumes::ContainerGroupId)
                            .to(ContainerGroups::Table, ContainerGroups::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContainerPortConfigs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerPortConfigs::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContainerPortConfigs::ContainerId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContainerPortConfigs::Name).string())
                    .col(
                        ColumnDef::new(ContainerPortConfigs::Port)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContainerPortConfigs::Protocol)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_port_configs_container_id")
                            .from(ContainerPortConfigs::Table, ContainerPortConfigs::ContainerId)
                            .to(Containers::Table, Containers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContainerEnvVars::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerEnvVars::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContainerEnvVars::ContainerId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContainerEnvVars::Name).string().not_null())
                    .col(ColumnDef::new(ContainerEnvVars::Value).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_env_vars_container_id")
                            .from(ContainerEnvVars::Table, ContainerEnvVars::ContainerId)
                            .to(Containers::Table, Containers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SecurityContexts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SecurityContexts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SecurityContexts::ContainerId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SecurityContexts::RunAsUser).big_integer())
                    .col(ColumnDef::new(SecurityContexts::RunAsNonRoot).boolean())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_security_contexts_container_id")
                            .from(SecurityContexts::Table, SecurityContexts::ContainerId)
                            .to(Containers::Table, Containers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContainerServicePortConfigs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerServicePortConfigs::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContainerServicePortConfigs::ContainerServiceId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContainerServicePortConfigs::Name).string())
                    .col(
                        ColumnDef::new(ContainerServicePortConfigs::Port)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContainerServicePortConfigs::TargetPort)
                            .string(),
                    )
                    .col(
                        ColumnDef::new(ContainerServicePortConfigs::Protocol)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_service_port_configs_container_service_id")
                            .from(ContainerServicePortConfigs::Table, ContainerServicePortConfigs::ContainerServiceId)
                            .to(ContainerServices::Table, ContainerServices::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContainerQuotaScopes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerQuotaScopes::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContainerQuotaScopes::ContainerQuotaId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContainerQuotaScopes::Scope)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_quota_scopes_container_quota_id")
                            .from(ContainerQuotaScopes::Table, ContainerQuotaScopes::ContainerQuotaId)
                            .to(ContainerQuotas::Table, ContainerQuotas::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContainerQuotaItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerQuotaItems::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContainerQuotaItems::ContainerQuotaId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContainerQuotaItems::Resource)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContainerQuotaItems::QuotaHard).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_quota_items_container_quota_id")
                            .from(ContainerQuotaItems::Table, ContainerQuotaItems::ContainerQuotaId)
                            .to(ContainerQuotas::Table, ContainerQuotas::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContainerLimitItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerLimitItems::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContainerLimitItems::ContainerLimitId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContainerLimitItems::ItemType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContainerLimitItems::Resource)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContainerLimitItems::Max).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_limit_items_container_limit_id")
                            .from(ContainerLimitItems::Table, ContainerLimitItems::ContainerLimitId)
                            .to(ContainerLimits::Table, ContainerLimits::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContainerTemplateParameters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainerTemplateParameters::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContainerTemplateParameters::ContainerTemplateId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContainerTemplateParameters::Name)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContainerTemplateParameters::Value).string())
                    .col(
                        ColumnDef::new(ContainerTemplateParameters::Required)
                            .boolean()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_container_template_parameters_container_template_id")
                            .from(ContainerTemplateParameters::Table, ContainerTemplateParameters::ContainerTemplateId)
                            .to(ContainerTemplates::Table, ContainerTemplates::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ComputerSystems::Table)
                    .col(ComputerSystems::ContainerNodeId)
                    .name("idx_computer_systems_container_node_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Hardwares::Table)
                    .col(Hardwares::ComputerSystemId)
                    .name("idx_hardwares_computer_system_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(OperatingSystems::Table)
                    .col(OperatingSystems::ComputerSystemId)
                    .name("idx_operating_systems_computer_system_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerVolumes::Table)
                    .col(ContainerVolumes::ContainerGroupId)
                    .name("idx_container_volumes_container_group_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerPortConfigs::Table)
                    .col(ContainerPortConfigs::ContainerId)
                    .name("idx_container_port_configs_container_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerEnvVars::Table)
                    .col(ContainerEnvVars::ContainerId)
                    .name("idx_container_env_vars_container_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(SecurityContexts::Table)
                    .col(SecurityContexts::ContainerId)
                    .name("idx_security_contexts_container_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerServicePortConfigs::Table)
                    .col(ContainerServicePortConfigs::ContainerServiceId)
                    .name("idx_container_service_port_configs_container_service_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerQuotaScopes::Table)
                    .col(ContainerQuotaScopes::ContainerQuotaId)
                    .name("idx_container_quota_scopes_container_quota_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerQuotaItems::Table)
                    .col(ContainerQuotaItems::ContainerQuotaId)
                    .name("idx_container_quota_items_container_quota_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerLimitItems::Table)
                    .col(ContainerLimitItems::ContainerLimitId)
                    .name("idx_container_limit_items_container_limit_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContainerTemplateParameters::Table)
                    .col(ContainerTemplateParameters::ContainerTemplateId)
                    .name("idx_container_template_parameters_container_template_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContainerTemplateParameters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerLimitItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerQuotaItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerQuotaScopes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerServicePortConfigs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SecurityContexts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerEnvVars::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerPortConfigs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerVolumes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OperatingSystems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Hardwares::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ComputerSystems::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ComputerSystems {
    Table,
    Id,
    ContainerNodeId,
}

#[derive(Iden)]
enum Hardwares {
    Table,
    Id,
    ComputerSystemId,
    CpuTotalCores,
    MemoryMb,
}

#[derive(Iden)]
enum OperatingSystems {
    Table,
    Id,
    ComputerSystemId,
    Distribution,
    KernelVersion,
}

#[derive(Iden)]
enum ContainerVolumes {
    Table,
    Id,
    ContainerGroupId,
    Name,
    ClaimName,
}

#[derive(Iden)]
enum ContainerPortConfigs {
    Table,
    Id,
    ContainerId,
    Name,
    Port,
    Protocol,
}

#[derive(Iden)]
enum ContainerEnvVars {
    Table,
    Id,
    ContainerId,
    Name,
    Value,
}

#[derive(Iden)]
enum SecurityContexts {
    Table,
    Id,
    ContainerId,
    RunAsUser,
    RunAsNonRoot,
}

#[derive(Iden)]
enum ContainerServicePortConfigs {
    Table,
    Id,
    ContainerServiceId,
    Name,
    Port,
    TargetPort,
    Protocol,
}

#[derive(Iden)]
enum ContainerQuotaScopes {
    Table,
    Id,
    ContainerQuotaId,
    Scope,
}

#[derive(Iden)]
enum ContainerQuotaItems {
    Table,
    Id,
    ContainerQuotaId,
    Resource,
    QuotaHard,
}

#[derive(Iden)]
enum ContainerLimitItems {
    Table,
    Id,
    ContainerLimitId,
    ItemType,
    Resource,
    Max,
}

#[derive(Iden)]
enum ContainerTemplateParameters {
    Table,
    Id,
    ContainerTemplateId,
    Name,
    Value,
    Required,
}

#[derive(Iden)]
enum ContainerNodes {
    Table,
    Id,
}

#[derive(Iden)]
enum ContainerGroups {
    Table,
    Id,
}

#[derive(Iden)]
enum Containers {
    Table,
    Id,
}

#[derive(Iden)]
enum ContainerServices {
    Table,
    Id,
}

#[derive(Iden)]
enum ContainerQuotas {
    Table,
    Id,
}

#[derive(Iden)]
enum ContainerLimits {
    Table,
    Id,
}

#[derive(Iden)]
enum ContainerTemplates {
    Table,
    Id,
}
