//! Entity-модели менеджера контейнеров и его инвентаря.

pub mod computer_systems;
pub mod container_build_pods;
pub mod container_builds;
pub mod container_env_vars;
pub mod container_groups;
pub mod container_image_registries;
pub mod container_images;
pub mod container_limit_items;
pub mod container_limits;
pub mod container_nodes;
pub mod container_port_configs;
pub mod container_projects;
pub mod container_quota_items;
pub mod container_quota_scopes;
pub mod container_quotas;
pub mod container_replicators;
pub mod container_routes;
pub mod container_service_port_configs;
pub mod container_services;
pub mod container_template_parameters;
pub mod container_templates;
pub mod container_volumes;
pub mod containers;
pub mod endpoints;
pub mod ext_management_systems;
pub mod hardwares;
pub mod operating_systems;
pub mod persistent_volume_claims;
pub mod persistent_volumes;
pub mod security_contexts;
