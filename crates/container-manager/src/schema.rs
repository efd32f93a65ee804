//! Каталог связей менеджера контейнеров.
//!
//! Каждая связь описана один раз в [`RELATIONSHIPS`]: целевая таблица,
//! внешний ключ, область видимости (только активные или все записи) и
//! политика удаления. Каскадное удаление и чтение инвентаря опираются на
//! этот каталог; тесты проверяют, что они ему соответствуют.

use serde::Serialize;

/// Связь менеджера контейнеров.
///
/// Порядок вариантов совпадает с порядком записей в [`RELATIONSHIPS`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    ContainerNodes,
    ContainerGroups,
    ContainerServices,
    ContainerReplicators,
    Containers,
    ContainerProjects,
    ContainerQuotas,
    ContainerRoutes,
    ContainerLimits,
    ContainerImageRegistries,
    ContainerImages,
    PersistentVolumes,
    PersistentVolumeClaims,
    ContainerBuilds,
    ContainerBuildPods,
    ContainerTemplates,
    ComputerSystems,
    ComputerSystemHardwares,
    ComputerSystemOperatingSystems,
    ContainerVolumes,
    ContainerPortConfigs,
    ContainerEnvVars,
    SecurityContexts,
    ContainerServicePortConfigs,
    ContainerQuotaScopes,
    ContainerQuotaItems,
    ContainerLimitItems,
    ContainerTemplateParameters,
    AllContainers,
    AllContainerGroups,
    AllContainerProjects,
    AllContainerImages,
    AllContainerNodes,
    AllContainerQuotas,
    InfraManager,
}

/// Вид связи.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Kind {
    /// Один ко многим по ems_id.
    HasMany,
    /// Один ко многим через полиморфного родителя (`{as_name}_type`, `{as_name}_id`).
    Polymorphic { as_name: &'static str },
    /// Один к одному; при `autosave` сохраняется вместе с менеджером.
    HasOne { autosave: bool },
    /// Производная связь: `source` строки, достижимые через связь `through`.
    Through {
        through: Relationship,
        source: &'static str,
    },
}

/// Область видимости связи.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Только активные записи (deleted_on IS NULL).
    Active,
    /// Все записи, включая архивные.
    All,
}

/// Политика при удалении менеджера.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dependent {
    /// Связь ничего не удаляет (производная или отфильтрованная).
    Keep,
    /// Строки удаляются вместе с менеджером.
    Destroy,
}

/// Объявление связи.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RelationshipDecl {
    pub relationship: Relationship,
    pub name: &'static str,
    /// Целевая таблица
    pub target: &'static str,
    pub kind: Kind,
    /// Внешний ключ в целевой таблице
    pub foreign_key: &'static str,
    pub scope: Scope,
    pub dependent: Dependent,
}

impl RelationshipDecl {
    /// Связь производная и не владеет строками.
    pub fn is_through(&self) -> bool {
        matches!(self.kind, Kind::Through { .. })
    }
}

const fn has_many(
    relationship: Relationship,
    name: &'static str,
    target: &'static str,
    scope: Scope,
    dependent: Dependent,
) -> RelationshipDecl {
    RelationshipDecl {
        relationship,
        name,
        target,
        kind: Kind::HasMany,
        foreign_key: "ems_id",
        scope,
        dependent,
    }
}

const fn through(
    relationship: Relationship,
    name: &'static str,
    target: &'static str,
    via: Relationship,
    source: &'static str,
    foreign_key: &'static str,
    scope: Scope,
) -> RelationshipDecl {
    RelationshipDecl {
        relationship,
        name,
        target,
        kind: Kind::Through {
            through: via,
            source,
        },
        foreign_key,
        scope,
        dependent: Dependent::Keep,
    }
}

use Dependent::{Destroy, Keep};
use Relationship as R;
use Scope::{Active, All};

/// Все связи менеджера контейнеров.
pub const RELATIONSHIPS: &[RelationshipDecl] = &[
    has_many(R::ContainerNodes, "container_nodes", "container_nodes", Active, Keep),
    has_many(R::ContainerGroups, "container_groups", "container_groups", Active, Keep),
    has_many(R::ContainerServices, "container_services", "container_services", All, Destroy),
    has_many(R::ContainerReplicators, "container_replicators", "container_replicators", All, Destroy),
    has_many(R::Containers, "containers", "containers", Active, Keep),
    has_many(R::ContainerProjects, "container_projects", "container_projects", Active, Keep),
    has_many(R::ContainerQuotas, "container_quotas", "container_quotas", Active, Keep),
    has_many(R::ContainerRoutes, "container_routes", "container_routes", All, Destroy),
    has_many(R::ContainerLimits, "container_limits", "container_limits", All, Destroy),
    has_many(
        R::ContainerImageRegistries,
        "container_image_registries",
        "container_image_registries",
        All,
        Destroy,
    ),
    has_many(R::ContainerImages, "container_images", "container_images", Active, Keep),
    RelationshipDecl {
        relationship: R::PersistentVolumes,
        name: "persistent_volumes",
        target: "persistent_volumes",
        kind: Kind::Polymorphic { as_name: "parent" },
        foreign_key: "parent_id",
        scope: All,
        dependent: Destroy,
    },
    has_many(
        R::PersistentVolumeClaims,
        "persistent_volume_claims",
        "persistent_volume_claims",
        All,
        Destroy,
    ),
    has_many(R::ContainerBuilds, "container_builds", "container_builds", All, Destroy),
    has_many(R::ContainerBuildPods, "container_build_pods", "container_build_pods", All, Destroy),
    has_many(R::ContainerTemplates, "container_templates", "container_templates", All, Destroy),
    // Производные связи, в основном для inventory refresh
    through(
        R::ComputerSystems,
        "computer_systems",
        "computer_systems",
        R::ContainerNodes,
        "computer_system",
        "container_node_id",
        Active,
    ),
    through(
        R::ComputerSystemHardwares,
        "computer_system_hardwares",
        "hardwares",
        R::ComputerSystems,
        "hardware",
        "computer_system_id",
        Active,
    ),
    through(
        R::ComputerSystemOperatingSystems,
        "computer_system_operating_systems",
        "operating_systems",
        R::ComputerSystems,
        "operating_system",
        "computer_system_id",
        Active,
    ),
    through(
        R::ContainerVolumes,
        "container_volumes",
        "container_volumes",
        R::ContainerGroups,
        "container_volume",
        "container_group_id",
        Active,
    ),
    through(
        R::ContainerPortConfigs,
        "container_port_configs",
        "container_port_configs",
        R::Containers,
        "container_port_config",
        "container_id",
        Active,
    ),
    through(
        R::ContainerEnvVars,
        "container_env_vars",
        "container_env_vars",
        R::Containers,
        "container_env_var",
        "container_id",
        Active,
    ),
    through(
        R::SecurityContexts,
        "security_contexts",
        "security_contexts",
        R::Containers,
        "security_context",
        "container_id",
        Active,
    ),
    through(
        R::ContainerServicePortConfigs,
        "container_service_port_configs",
        "container_service_port_configs",
        R::ContainerServices,
        "container_service_port_config",
        "container_service_id",
        All,
    ),
    through(
        R::ContainerQuotaScopes,
        "container_quota_scopes",
        "container_quota_scopes",
        R::ContainerQuotas,
        "container_quota_scope",
        "container_quota_id",
        Active,
    ),
    through(
        R::ContainerQuotaItems,
        "container_quota_items",
        "container_quota_items",
        R::ContainerQuotas,
        "container_quota_item",
        "container_quota_id",
        Active,
    ),
    through(
        R::ContainerLimitItems,
        "container_limit_items",
        "container_limit_items",
        R::ContainerLimits,
        "container_limit_item",
        "container_limit_id",
        All,
    ),
    through(
        R::ContainerTemplateParameters,
        "container_template_parameters",
        "container_template_parameters",
        R::ContainerTemplates,
        "container_template_parameter",
        "container_template_id",
        All,
    ),
    // Архивные и активные записи, удаляемые вместе с менеджером
    has_many(R::AllContainers, "all_containers", "containers", All, Destroy),
    has_many(R::AllContainerGroups, "all_container_groups", "container_groups", All, Destroy),
    has_many(R::AllContainerProjects, "all_container_projects", "container_projects", All, Destroy),
    has_many(R::AllContainerImages, "all_container_images", "container_images", All, Destroy),
    has_many(R::AllContainerNodes, "all_container_nodes", "container_nodes", All, Destroy),
    has_many(R::AllContainerQuotas, "all_container_quotas", "container_quotas", All, Destroy),
    RelationshipDecl {
        relationship: R::InfraManager,
        name: "infra_manager",
        target: "ext_management_systems",
        kind: Kind::HasOne { autosave: true },
        foreign_key: "parent_ems_id",
        scope: All,
        dependent: Destroy,
    },
];

/// Полный набор объявлений связей.
pub fn relationships() -> &'static [RelationshipDecl] {
    RELATIONSHIPS
}

/// Найти объявление по имени связи.
pub fn find(name: &str) -> Option<&'static RelationshipDecl> {
    RELATIONSHIPS.iter().find(|d| d.name == name)
}

/// Связи, строки которых удаляются вместе с менеджером.
pub fn cascade_targets() -> impl Iterator<Item = &'static RelationshipDecl> {
    RELATIONSHIPS
        .iter()
        .filter(|d| d.dependent == Dependent::Destroy)
}

impl Relationship {
    pub fn decl(self) -> &'static RelationshipDecl {
        &RELATIONSHIPS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.decl().name
    }

    pub fn iter() -> impl Iterator<Item = Relationship> {
        RELATIONSHIPS.iter().map(|d| d.relationship)
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

impl std::str::FromStr for Relationship {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        find(s)
            .map(|d| d.relationship)
            .ok_or_else(|| format!("Неизвестная связь: {s}"))
    }
}
