//! Тесты: подписи, порт, диспетчеризация возможностей, каталог связей,
//! интеграционные тесты каскадного удаления и производных связей.

#[cfg(test)]
mod tests {
    use crate::capability::{Feature, MonitoringCapability, VirtualizationCapability};
    use crate::error::AppError;
    use crate::manager::{display_name, ContainerManager};
    use crate::schema::{self, Dependent, Kind, Relationship, Scope};
    use async_trait::async_trait;
    use container_entities::{endpoints, ext_management_systems};
    use sea_orm::{Database, DatabaseConnection, DatabaseTransaction, TransactionTrait};
    use std::sync::{Arc, Mutex};

    fn manager_record() -> ext_management_systems::Model {
        ext_management_systems::Model {
            id: "ems-1".to_string(),
            name: "openshift-prod".to_string(),
            kind: ext_management_systems::ManagerKind::Container,
            parent_ems_id: None,
            zone: None,
            created_on: "2026-02-26T10:00:00Z".to_string(),
        }
    }

    fn default_endpoint(port: Option<i32>) -> endpoints::Model {
        endpoints::Model {
            id: "ep-1".to_string(),
            ems_id: "ems-1".to_string(),
            role: endpoints::DEFAULT_ROLE.to_string(),
            hostname: "api.cluster.example.com".to_string(),
            port,
            created_on: "2026-02-26T10:00:00Z".to_string(),
        }
    }

    /// Хуки получают транзакцию; схема для тестов диспетчеризации не нужна.
    async fn open_txn() -> (DatabaseConnection, DatabaseTransaction) {
        let db: DatabaseConnection = Database::connect("sqlite::memory:").await.unwrap();
        let txn = db.begin().await.unwrap();
        (db, txn)
    }

    /// Записывает вызовы хуков.
    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MonitoringCapability for Recorder {
        async fn monitoring_endpoint_created(
            &self,
            _txn: &DatabaseTransaction,
            _manager: &ext_management_systems::Model,
            role: &str,
        ) -> Result<(), AppError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("monitoring_created:{role}"));
            Ok(())
        }

        async fn monitoring_endpoint_destroyed(
            &self,
            _txn: &DatabaseTransaction,
            _manager: &ext_management_systems::Model,
            role: &str,
        ) -> Result<(), AppError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("monitoring_destroyed:{role}"));
            Ok(())
        }
    }

    #[async_trait]
    impl VirtualizationCapability for Recorder {
        async fn virtualization_endpoint_created(
            &self,
            _txn: &DatabaseTransaction,
            _manager: &ext_management_systems::Model,
            role: &str,
        ) -> Result<(), AppError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("virtualization_created:{role}"));
            Ok(())
        }

        async fn virtualization_endpoint_destroyed(
            &self,
            _txn: &DatabaseTransaction,
            _manager: &ext_management_systems::Model,
            role: &str,
        ) -> Result<(), AppError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("virtualization_destroyed:{role}"));
            Ok(())
        }
    }

    // ── Подписи и порт ────────────────────────────────────────────────────────

    #[test]
    fn test_display_name_pluralization() {
        assert_eq!(display_name(1), "Containers Manager");
        assert_eq!(display_name(2), "Containers Managers");
        assert_eq!(display_name(0), "Containers Managers");
    }

    #[test]
    fn test_port_display() {
        let unset = ContainerManager::new(manager_record(), Some(default_endpoint(None)));
        assert_eq!(unset.port_display(), "");

        let no_endpoint = ContainerManager::new(manager_record(), None);
        assert_eq!(no_endpoint.port_display(), "");

        let set = ContainerManager::new(manager_record(), Some(default_endpoint(Some(8443))));
        assert_eq!(set.port_display(), "8443");
        assert_eq!(set.port(), Some(8443));
    }

    #[test]
    fn test_supported_features() {
        let manager = ContainerManager::new(manager_record(), None);
        assert!(manager.supports(Feature::AuthenticationStatus));
        assert!(manager.supports(Feature::Metrics));
        assert!(manager.supports(Feature::Performance));
    }

    // ── Диспетчеризация возможностей ──────────────────────────────────────────

    #[tokio::test]
    async fn test_hooks_without_capabilities_are_noop() {
        let (_db, txn) = open_txn().await;
        let manager = ContainerManager::new(manager_record(), None);
        assert!(!manager.has_monitoring());
        assert!(!manager.has_virtualization());

        assert!(manager.on_endpoint_created(&txn, "default").await.is_ok());
        assert!(manager.on_endpoint_destroyed(&txn, "default").await.is_ok());
    }

    #[tokio::test]
    async fn test_only_monitoring_hook_is_called() {
        let (_db, txn) = open_txn().await;
        let recorder = Arc::new(Recorder::default());
        let manager = ContainerManager::new(manager_record(), None)
            .with_monitoring(recorder.clone() as Arc<dyn MonitoringCapability>);

        manager.on_endpoint_created(&txn, "prometheus").await.unwrap();
        manager.on_endpoint_destroyed(&txn, "prometheus").await.unwrap();

        assert_eq!(
            recorder.calls(),
            vec![
                "monitoring_created:prometheus".to_string(),
                "monitoring_destroyed:prometheus".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_only_virtualization_hook_is_called() {
        let (_db, txn) = open_txn().await;
        let recorder = Arc::new(Recorder::default());
        let manager = ContainerManager::new(manager_record(), None)
            .with_virtualization(recorder.clone() as Arc<dyn VirtualizationCapability>);

        manager.on_endpoint_created(&txn, "kubevirt").await.unwrap();

        assert_eq!(recorder.calls(), vec!["virtualization_created:kubevirt".to_string()]);
    }

    #[tokio::test]
    async fn test_both_hooks_called_monitoring_first() {
        let (_db, txn) = open_txn().await;
        let recorder = Arc::new(Recorder::default());
        let manager = ContainerManager::new(manager_record(), None)
            .with_monitoring(recorder.clone() as Arc<dyn MonitoringCapability>)
            .with_virtualization(recorder.clone() as Arc<dyn VirtualizationCapability>);

        manager.on_endpoint_created(&txn, "default").await.unwrap();
        manager.on_endpoint_destroyed(&txn, "default").await.unwrap();

        assert_eq!(
            recorder.calls(),
            vec![
                "monitoring_created:default".to_string(),
                "virtualization_created:default".to_string(),
                "monitoring_destroyed:default".to_string(),
                "virtualization_destroyed:default".to_string(),
            ]
        );
    }

    // ── Каталог связей ────────────────────────────────────────────────────────

    #[test]
    fn test_catalog_order_matches_enum() {
        let decls = schema::relationships();
        assert_eq!(decls.len(), 35);
        for (i, decl) in decls.iter().enumerate() {
            assert_eq!(decl.relationship as usize, i, "{} не на своём месте", decl.name);
        }
    }

    #[test]
    fn test_catalog_names_unique_and_parseable() {
        let mut names: Vec<&str> = schema::relationships().iter().map(|d| d.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), schema::relationships().len());

        for relationship in Relationship::iter() {
            let parsed: Relationship = relationship.name().parse().unwrap();
            assert_eq!(parsed, relationship);
        }
        assert!("container_widgets".parse::<Relationship>().is_err());
    }

    #[test]
    fn test_every_active_relationship_has_all_twin() {
        let active: Vec<_> = schema::relationships()
            .iter()
            .filter(|d| d.kind == Kind::HasMany && d.scope == Scope::Active)
            .collect();
        assert_eq!(active.len(), 6);

        for decl in active {
            assert_eq!(decl.dependent, Dependent::Keep);
            let twin = schema::find(&format!("all_{}", decl.name))
                .unwrap_or_else(|| panic!("нет all_{}", decl.name));
            assert_eq!(twin.target, decl.target);
            assert_eq!(twin.foreign_key, decl.foreign_key);
            assert_eq!(twin.scope, Scope::All);
            assert_eq!(twin.dependent, Dependent::Destroy);
        }
    }

    #[test]
    fn test_through_relationships_own_nothing() {
        let through: Vec<_> = schema::relationships()
            .iter()
            .filter(|d| d.is_through())
            .collect();
        assert_eq!(through.len(), 12);

        for decl in through {
            assert_eq!(decl.dependent, Dependent::Keep, "{}", decl.name);
            let Kind::Through { through: via, .. } = decl.kind else {
                unreachable!()
            };
            // Область видимости наследуется от промежуточной связи
            assert_eq!(decl.scope, via.decl().scope, "{}", decl.name);
            assert!(!via.decl().is_through() || via == Relationship::ComputerSystems);
        }
    }

    #[test]
    fn test_cascade_targets() {
        let targets: Vec<&str> = schema::cascade_targets().map(|d| d.name).collect();
        assert_eq!(targets.len(), 17);
        assert!(targets.contains(&"persistent_volumes"));
        assert!(targets.contains(&"infra_manager"));
        assert!(targets.contains(&"all_containers"));
        assert!(!targets.contains(&"containers"));

        let infra = Relationship::InfraManager.decl();
        assert_eq!(infra.kind, Kind::HasOne { autosave: true });
        assert_eq!(infra.foreign_key, "parent_ems_id");

        let volumes = Relationship::PersistentVolumes.decl();
        assert_eq!(volumes.kind, Kind::Polymorphic { as_name: "parent" });
    }

    #[test]
    fn test_output_format_parse() {
        use crate::config::OutputFormat;

        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TABLE".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    // ── Интеграционные тесты на SQLite в памяти ───────────────────────────────

    mod integration {
        use crate::error::AppError;
        use crate::schema::{self, Relationship};
        use crate::services::archive_service::{self, Archivable};
        use crate::services::endpoint_service::{self, EndpointData};
        use crate::services::registry_service::{self, RegisterData};
        use crate::services::{cascade_service, inventory_service};
        use container_entities::ext_management_systems::ManagerKind;
        use container_entities::*;
        use container_migration::{Migrator, MigratorTrait};
        use sea_orm::{
            ActiveModelTrait, ActiveValue::Set, ColumnTrait, Database, DatabaseConnection,
            EntityTrait, PaginatorTrait, QueryFilter, SqlErr,
        };
        use uuid::Uuid;

        async fn build_test_db() -> DatabaseConnection {
            let db: DatabaseConnection = Database::connect("sqlite::memory:").await.unwrap();
            Migrator::up(&db, None).await.unwrap();
            db
        }

        fn new_id() -> String {
            Uuid::new_v4().to_string()
        }

        const ARCHIVED_ON: &str = "2026-02-20T08:00:00Z";

        async fn register(db: &DatabaseConnection, name: &str) -> String {
            let manager = registry_service::register_manager(
                db,
                RegisterData {
                    name: name.to_string(),
                    hostname: format!("api.{name}.example.com"),
                    port: Some(8443),
                    zone: Some("default".to_string()),
                },
            )
            .await
            .unwrap();
            manager.id().to_string()
        }

        /// Идентификаторы записей, созданных [`seed_inventory`].
        struct Seeded {
            group: String,
            archived_group: String,
            container: String,
        }

        /// Полный инвентарь менеджера: активные и архивные записи, вложенные ресурсы.
        async fn seed_inventory(db: &DatabaseConnection, ems_id: &str) -> Seeded {
            let ems = || Set(Some(ems_id.to_string()));

            let project = container_projects::ActiveModel {
                id: Set(new_id()),
                ems_id: ems(),
                ems_ref: Set("project-1".into()),
                name: Set("default".into()),
                deleted_on: Set(None),
            }
            .insert(db)
            .await
            .unwrap();

            let mut group_ids = Vec::new();
            for deleted_on in [None, Some(ARCHIVED_ON.to_string())] {
                let group = container_groups::ActiveModel {
                    id: Set(new_id()),
                    ems_id: ems(),
                    ems_ref: Set(new_id()),
                    name: Set("web-0".into()),
                    container_project_id: Set(Some(project.id.clone())),
                    deleted_on: Set(deleted_on.clone()),
                }
                .insert(db)
                .await
                .unwrap();

                container_volumes::ActiveModel {
                    id: Set(new_id()),
                    container_group_id: Set(group.id.clone()),
                    name: Set("data".into()),
                    claim_name: Set(Some("data-claim".into())),
                }
                .insert(db)
                .await
                .unwrap();

                let container = containers::ActiveModel {
                    id: Set(new_id()),
                    ems_id: ems(),
                    ems_ref: Set(new_id()),
                    name: Set("nginx".into()),
                    container_group_id: Set(Some(group.id.clone())),
                    deleted_on: Set(deleted_on.clone()),
                }
                .insert(db)
                .await
                .unwrap();

                container_port_configs::ActiveModel {
                    id: Set(new_id()),
                    container_id: Set(container.id.clone()),
                    name: Set(Some("http".into())),
                    port: Set(8080),
                    protocol: Set("TCP".into()),
                }
                .insert(db)
                .await
                .unwrap();
                container_env_vars::ActiveModel {
                    id: Set(new_id()),
                    container_id: Set(container.id.clone()),
                    name: Set("LOG_LEVEL".into()),
                    value: Set(Some("info".into())),
                }
                .insert(db)
                .await
                .unwrap();
                security_contexts::ActiveModel {
                    id: Set(new_id()),
                    container_id: Set(container.id.clone()),
                    run_as_user: Set(Some(1000)),
                    run_as_non_root: Set(Some(true)),
                }
                .insert(db)
                .await
                .unwrap();

                let node = container_nodes::ActiveModel {
                    id: Set(new_id()),
                    ems_id: ems(),
                    ems_ref: Set(new_id()),
                    name: Set("node-1".into()),
                    deleted_on: Set(deleted_on.clone()),
                }
                .insert(db)
                .await
                .unwrap();
                let system = computer_systems::ActiveModel {
                    id: Set(new_id()),
                    container_node_id: Set(node.id.clone()),
                }
                .insert(db)
                .await
                .unwrap();
                hardwares::ActiveModel {
                    id: Set(new_id()),
                    computer_system_id: Set(system.id.clone()),
                    cpu_total_cores: Set(Some(8)),
                    memory_mb: Set(Some(32768)),
                }
                .insert(db)
                .await
                .unwrap();
                operating_systems::ActiveModel {
                    id: Set(new_id()),
                    computer_system_id: Set(system.id.clone()),
                    distribution: Set(Some("rhcos".into())),
                    kernel_version: Set(Some("5.14".into())),
                }
                .insert(db)
                .await
                .unwrap();

                let quota = container_quotas::ActiveModel {
                    id: Set(new_id()),
                    ems_id: ems(),
                    ems_ref: Set(new_id()),
                    name: Set("compute".into()),
                    deleted_on: Set(deleted_on.clone()),
                }
                .insert(db)
                .await
                .unwrap();
                container_quota_scopes::ActiveModel {
                    id: Set(new_id()),
                    container_quota_id: Set(quota.id.clone()),
                    scope: Set("NotTerminating".into()),
                }
                .insert(db)
                .await
                .unwrap();
                container_quota_items::ActiveModel {
                    id: Set(new_id()),
                    container_quota_id: Set(quota.id.clone()),
                    resource: Set("limits.memory".into()),
                    quota_hard: Set(Some("4Gi".into())),
                }
                .insert(db)
                .await
                .unwrap();

                container_images::ActiveModel {
                    id: Set(new_id()),
                    ems_id: ems(),
                    ems_ref: Set(new_id()),
                    name: Set("nginx".into()),
                    digest: Set(Some("sha256:abc".into())),
                    deleted_on: Set(deleted_on.clone()),
                }
                .insert(db)
                .await
                .unwrap();

                group_ids.push((group.id, container.id));
            }

            let service = container_services::ActiveModel {
                id: Set(new_id()),
                ems_id: ems(),
                ems_ref: Set(new_id()),
                name: Set("web".into()),
            }
            .insert(db)
            .await
            .unwrap();
            container_service_port_configs::ActiveModel {
                id: Set(new_id()),
                container_service_id: Set(service.id.clone()),
                name: Set(Some("http".into())),
                port: Set(80),
                target_port: Set(Some("8080".into())),
                protocol: Set("TCP".into()),
            }
            .insert(db)
            .await
            .unwrap();

            container_replicators::ActiveModel {
                id: Set(new_id()),
                ems_id: ems(),
                ems_ref: Set(new_id()),
                name: Set("web-rc".into()),
                replicas: Set(Some(2)),
            }
            .insert(db)
            .await
            .unwrap();
            container_routes::ActiveModel {
                id: Set(new_id()),
                ems_id: ems(),
                ems_ref: Set(new_id()),
                name: Set("web-route".into()),
                host_name: Set(Some("web.apps.example.com".into())),
            }
            .insert(db)
            .await
            .unwrap();

            let limit = container_limits::ActiveModel {
                id: Set(new_id()),
                ems_id: ems(),
                ems_ref: Set(new_id()),
                name: Set("limits".into()),
            }
            .insert(db)
            .await
            .unwrap();
            container_limit_items::ActiveModel {
                id: Set(new_id()),
                container_limit_id: Set(limit.id.clone()),
                item_type: Set("Container".into()),
                resource: Set("memory".into()),
                max: Set(Some("1Gi".into())),
            }
            .insert(db)
            .await
            .unwrap();

            container_image_registries::ActiveModel {
                id: Set(new_id()),
                ems_id: ems(),
                ems_ref: Set(new_id()),
                name: Set("registry".into()),
                host: Set("registry.example.com".into()),
                port: Set(Some(5000)),
            }
            .insert(db)
            .await
            .unwrap();
            persistent_volume_claims::ActiveModel {
                id: Set(new_id()),
                ems_id: ems(),
                ems_ref: Set(new_id()),
                name: Set("data-claim".into()),
                capacity: Set(Some("10Gi".into())),
            }
            .insert(db)
            .await
            .unwrap();
            container_builds::ActiveModel {
                id: Set(new_id()),
                ems_id: ems(),
                ems_ref: Set(new_id()),
                name: Set("web-build".into()),
            }
            .insert(db)
            .await
            .unwrap();
            container_build_pods::ActiveModel {
                id: Set(new_id()),
                ems_id: ems(),
                ems_ref: Set(new_id()),
                name: Set("web-build-1".into()),
                phase: Set(Some("Complete".into())),
            }
            .insert(db)
            .await
            .unwrap();

            let template = container_templates::ActiveModel {
                id: Set(new_id()),
                ems_id: ems(),
                ems_ref: Set(new_id()),
                name: Set("nginx-example".into()),
            }
            .insert(db)
            .await
            .unwrap();
            container_template_parameters::ActiveModel {
                id: Set(new_id()),
                container_template_id: Set(template.id.clone()),
                name: Set("NAME".into()),
                value: Set(Some("nginx".into())),
                required: Set(true),
            }
            .insert(db)
            .await
            .unwrap();

            persistent_volumes::ActiveModel {
                id: Set(new_id()),
                parent_type: Set(persistent_volumes::EMS_PARENT_TYPE.into()),
                parent_id: Set(ems_id.to_string()),
                ems_ref: Set(new_id()),
                name: Set("pv-0001".into()),
                capacity: Set(Some("10Gi".into())),
            }
            .insert(db)
            .await
            .unwrap();

            let (group, container) = group_ids[0].clone();
            let (archived_group, _) = group_ids[1].clone();
            Seeded {
                group,
                archived_group,
                container,
            }
        }

        // ── Регистрация ───────────────────────────────────────────────────────

        #[tokio::test]
        async fn test_register_manager_with_default_endpoint() {
            let db = build_test_db().await;
            let id = register(&db, "prod").await;

            let manager = registry_service::load_manager(&db, &id).await.unwrap();
            assert_eq!(manager.port_display(), "8443");
            assert!(manager.has_monitoring());
            assert!(manager.has_virtualization());

            // Роль default не создаёт дочерних менеджеров
            assert!(registry_service::child_managers(&db, &id)
                .await
                .unwrap()
                .is_empty());

            let duplicate = registry_service::register_manager(
                &db,
                RegisterData {
                    name: "prod".into(),
                    hostname: "other.example.com".into(),
                    port: None,
                    zone: None,
                },
            )
            .await;
            assert!(matches!(duplicate, Err(AppError::Conflict(_))));
        }

        // ── Endpoints и дочерние менеджеры ────────────────────────────────────

        #[tokio::test]
        async fn test_kubevirt_endpoint_creates_and_removes_infra_manager() {
            let db = build_test_db().await;
            let id = register(&db, "prod").await;

            endpoint_service::add_endpoint(
                &db,
                &id,
                EndpointData {
                    role: "kubevirt".into(),
                    hostname: "api.prod.example.com".into(),
                    port: Some(8443),
                },
            )
            .await
            .unwrap();

            let infra = inventory_service::load(&db, &id, Relationship::InfraManager)
                .await
                .unwrap();
            assert_eq!(infra.len(), 1);
            assert_eq!(infra[0]["name"], "prod Virtualization Manager");

            endpoint_service::remove_endpoint(&db, &id, "kubevirt")
                .await
                .unwrap();
            assert_eq!(
                inventory_service::count(&db, &id, Relationship::InfraManager)
                    .await
                    .unwrap(),
                0
            );
        }

        #[tokio::test]
        async fn test_monitoring_roles() {
            let db = build_test_db().await;
            let id = register(&db, "prod").await;

            // prometheus (метрики) не создаёт менеджер мониторинга
            endpoint_service::add_endpoint(
                &db,
                &id,
                EndpointData {
                    role: "prometheus".into(),
                    hostname: "prometheus.prod.example.com".into(),
                    port: Some(443),
                },
            )
            .await
            .unwrap();
            assert!(registry_service::child_managers(&db, &id)
                .await
                .unwrap()
                .is_empty());

            endpoint_service::add_endpoint(
                &db,
                &id,
                EndpointData {
                    role: "prometheus_alerts".into(),
                    hostname: "alerts.prod.example.com".into(),
                    port: Some(443),
                },
            )
            .await
            .unwrap();
            let children = registry_service::child_managers(&db, &id).await.unwrap();
            assert_eq!(children.len(), 1);
            assert_eq!(children[0].kind, ManagerKind::Monitoring);

            // Менеджер мониторинга не является infra_manager
            assert_eq!(
                inventory_service::count(&db, &id, Relationship::InfraManager)
                    .await
                    .unwrap(),
                0
            );
        }

        #[tokio::test]
        async fn test_endpoint_errors() {
            let db = build_test_db().await;
            let id = register(&db, "prod").await;

            let default = endpoint_service::remove_endpoint(&db, &id, "default").await;
            assert!(matches!(default, Err(AppError::BadRequest(_))));

            let missing = endpoint_service::remove_endpoint(&db, &id, "kubevirt").await;
            assert!(matches!(missing, Err(AppError::NotFound(_))));

            let duplicate = endpoint_service::add_endpoint(
                &db,
                &id,
                EndpointData {
                    role: "default".into(),
                    hostname: "api.prod.example.com".into(),
                    port: None,
                },
            )
            .await;
            assert!(matches!(duplicate, Err(AppError::Conflict(_))));

            let unknown = endpoint_service::add_endpoint(
                &db,
                "no-such-manager",
                EndpointData {
                    role: "kubevirt".into(),
                    hostname: "api.example.com".into(),
                    port: None,
                },
            )
            .await;
            assert!(matches!(unknown, Err(AppError::NotFound(_))));
        }

        // ── Производные связи ─────────────────────────────────────────────────

        #[tokio::test]
        async fn test_active_and_all_relationships() {
            let db = build_test_db().await;
            let id = register(&db, "prod").await;
            seed_inventory(&db, &id).await;

            for (active, all) in [
                (Relationship::ContainerNodes, Relationship::AllContainerNodes),
                (Relationship::ContainerGroups, Relationship::AllContainerGroups),
                (Relationship::Containers, Relationship::AllContainers),
                (Relationship::ContainerQuotas, Relationship::AllContainerQuotas),
                (Relationship::ContainerImages, Relationship::AllContainerImages),
            ] {
                assert_eq!(inventory_service::count(&db, &id, active).await.unwrap(), 1);
                assert_eq!(inventory_service::count(&db, &id, all).await.unwrap(), 2);
            }
            assert_eq!(
                inventory_service::count(&db, &id, Relationship::PersistentVolumes)
                    .await
                    .unwrap(),
                1
            );
        }

        #[tokio::test]
        async fn test_through_reads_follow_active_owners() {
            let db = build_test_db().await;
            let id = register(&db, "prod").await;
            let seeded = seed_inventory(&db, &id).await;

            // Тома только активного pod'а
            let volumes = inventory_service::load(&db, &id, Relationship::ContainerVolumes)
                .await
                .unwrap();
            assert_eq!(volumes.len(), 1);
            assert_eq!(volumes[0]["container_group_id"], seeded.group.as_str());

            for relationship in [
                Relationship::ComputerSystems,
                Relationship::ComputerSystemHardwares,
                Relationship::ComputerSystemOperatingSystems,
                Relationship::ContainerPortConfigs,
                Relationship::ContainerEnvVars,
                Relationship::SecurityContexts,
                Relationship::ContainerQuotaScopes,
                Relationship::ContainerQuotaItems,
                Relationship::ContainerServicePortConfigs,
                Relationship::ContainerLimitItems,
                Relationship::ContainerTemplateParameters,
            ] {
                assert_eq!(
                    inventory_service::count(&db, &id, relationship).await.unwrap(),
                    1,
                    "{relationship}"
                );
            }

            // Архивация pod'а убирает его тома из производной связи, но не из таблицы
            archive_service::archive(&db, Archivable::ContainerGroups, &seeded.group)
                .await
                .unwrap();
            assert_eq!(
                inventory_service::count(&db, &id, Relationship::ContainerVolumes)
                    .await
                    .unwrap(),
                0
            );
            assert_eq!(container_volumes::Entity::find().count(&db).await.unwrap(), 2);

            archive_service::unarchive(&db, Archivable::ContainerGroups, &seeded.archived_group)
                .await
                .unwrap();
            let volumes = inventory_service::load(&db, &id, Relationship::ContainerVolumes)
                .await
                .unwrap();
            assert_eq!(volumes.len(), 1);
            assert_eq!(volumes[0]["container_group_id"], seeded.archived_group.as_str());
        }

        #[tokio::test]
        async fn test_through_reads_are_scoped_to_manager() {
            let db = build_test_db().await;
            let prod = register(&db, "prod").await;
            let staging = register(&db, "staging").await;
            let seeded = seed_inventory(&db, &prod).await;
            seed_inventory(&db, &staging).await;

            let ports = inventory_service::load(&db, &prod, Relationship::ContainerPortConfigs)
                .await
                .unwrap();
            assert_eq!(ports.len(), 1);
            assert_eq!(ports[0]["container_id"], seeded.container.as_str());

            let summary = inventory_service::summary(&db, &prod).await.unwrap();
            assert_eq!(summary.len(), schema::relationships().len());
        }

        // ── Каскадное удаление ────────────────────────────────────────────────

        #[tokio::test]
        async fn test_destroy_manager_removes_everything() {
            let db = build_test_db().await;
            let prod = register(&db, "prod").await;
            let staging = register(&db, "staging").await;
            seed_inventory(&db, &prod).await;
            seed_inventory(&db, &staging).await;

            endpoint_service::add_endpoint(
                &db,
                &prod,
                EndpointData {
                    role: "kubevirt".into(),
                    hostname: "api.prod.example.com".into(),
                    port: None,
                },
            )
            .await
            .unwrap();
            let before = inventory_service::summary(&db, &staging).await.unwrap();

            let report = cascade_service::destroy_manager(&db, &prod).await.unwrap();

            // Дочерний infra-менеджер удалён раньше корневого
            assert_eq!(report.managers.len(), 2);
            assert_eq!(report.managers.last(), Some(&prod));

            // Каждая каскадная связь каталога отражена в отчёте
            for decl in schema::cascade_targets() {
                assert!(
                    report.removed_from(decl.target) > 0,
                    "{} не удалена",
                    decl.name
                );
            }
            // Архивные записи тоже удалены
            assert_eq!(report.removed_from("containers"), 2);
            assert_eq!(report.removed_from("container_groups"), 2);
            assert_eq!(report.removed_from("hardwares"), 2);

            // Ни одной строки, ссылающейся на удалённый менеджер
            assert!(matches!(
                registry_service::get_manager(&db, &prod).await,
                Err(AppError::NotFound(_))
            ));
            for relationship in Relationship::iter() {
                assert_eq!(
                    inventory_service::count(&db, &prod, relationship)
                        .await
                        .unwrap(),
                    0,
                    "{relationship}"
                );
            }
            assert_eq!(
                endpoints::Entity::find()
                    .filter(endpoints::Column::EmsId.eq(prod.as_str()))
                    .count(&db)
                    .await
                    .unwrap(),
                0
            );

            // Инвентарь другого менеджера не затронут
            let after = inventory_service::summary(&db, &staging).await.unwrap();
            assert_eq!(before, after);
            assert_eq!(
                computer_systems::Entity::find().count(&db).await.unwrap(),
                2
            );
        }

        #[tokio::test]
        async fn test_destroy_manager_rolls_back_on_integrity_failure() {
            let db = build_test_db().await;
            let prod = register(&db, "prod").await;
            let staging = register(&db, "staging").await;
            let seeded = seed_inventory(&db, &prod).await;

            // Контейнер другого менеджера ссылается на pod удаляемого
            containers::ActiveModel {
                id: Set(new_id()),
                ems_id: Set(Some(staging.clone())),
                ems_ref: Set(new_id()),
                name: Set("sidecar".into()),
                container_group_id: Set(Some(seeded.group.clone())),
                deleted_on: Set(None),
            }
            .insert(&db)
            .await
            .unwrap();

            let before = inventory_service::summary(&db, &prod).await.unwrap();
            let result = cascade_service::destroy_manager(&db, &prod).await;
            assert!(
                matches!(result, Err(AppError::ManagerDeletion { ref id, .. }) if id == &prod),
                "ожидалась ошибка удаления менеджера"
            );

            // Транзакция откачена целиком
            assert!(registry_service::get_manager(&db, &prod).await.is_ok());
            let after = inventory_service::summary(&db, &prod).await.unwrap();
            assert_eq!(before, after);
        }

        #[tokio::test]
        async fn test_destroy_unknown_manager() {
            let db = build_test_db().await;
            let result = cascade_service::destroy_manager(&db, "no-such-manager").await;
            assert!(matches!(result, Err(AppError::NotFound(_))));
        }

        #[tokio::test]
        async fn test_orphaned_rows_survive_deletion() {
            let db = build_test_db().await;
            let prod = register(&db, "prod").await;

            container_images::ActiveModel {
                id: Set(new_id()),
                ems_id: Set(None),
                ems_ref: Set(new_id()),
                name: Set("orphan".into()),
                digest: Set(None),
                deleted_on: Set(Some(ARCHIVED_ON.into())),
            }
            .insert(&db)
            .await
            .unwrap();

            cascade_service::destroy_manager(&db, &prod).await.unwrap();
            assert_eq!(container_images::Entity::find().count(&db).await.unwrap(), 1);
        }

        // ── Endpoints и хуки в одной транзакции ───────────────────────────────

        async fn add_kubevirt(db: &DatabaseConnection, ems_id: &str) -> Result<(), AppError> {
            endpoint_service::add_endpoint(
                db,
                ems_id,
                EndpointData {
                    role: "kubevirt".into(),
                    hostname: "api.prod.example.com".into(),
                    port: Some(8443),
                },
            )
            .await
            .map(|_| ())
        }

        async fn endpoint_roles(db: &DatabaseConnection, ems_id: &str) -> Vec<String> {
            endpoint_service::list_endpoints(db, ems_id)
                .await
                .unwrap()
                .into_iter()
                .map(|e| e.role)
                .collect()
        }

        #[tokio::test]
        async fn test_remove_endpoint_keeps_endpoint_when_child_cannot_be_removed() {
            let db = build_test_db().await;
            let prod = register(&db, "prod").await;
            add_kubevirt(&db, &prod).await.unwrap();

            let infra = crate::capability::find_child_manager(&db, &prod, ManagerKind::Infra)
                .await
                .unwrap()
                .expect("infra-менеджер должен быть создан");

            // Контейнер prod ссылается на pod infra-менеджера
            let group = container_groups::ActiveModel {
                id: Set(new_id()),
                ems_id: Set(Some(infra.id.clone())),
                ems_ref: Set(new_id()),
                name: Set("virt-launcher".into()),
                container_project_id: Set(None),
                deleted_on: Set(None),
            }
            .insert(&db)
            .await
            .unwrap();
            let blocker = containers::ActiveModel {
                id: Set(new_id()),
                ems_id: Set(Some(prod.clone())),
                ems_ref: Set(new_id()),
                name: Set("compute".into()),
                container_group_id: Set(Some(group.id.clone())),
                deleted_on: Set(None),
            }
            .insert(&db)
            .await
            .unwrap();

            let result = endpoint_service::remove_endpoint(&db, &prod, "kubevirt").await;
            assert!(
                matches!(result, Err(AppError::ManagerDeletion { ref id, .. }) if id == &infra.id),
                "ожидалась ошибка удаления infra-менеджера"
            );

            // Endpoint и infra-менеджер на месте, операцию можно повторить
            assert_eq!(endpoint_roles(&db, &prod).await, vec!["default", "kubevirt"]);
            assert_eq!(
                inventory_service::count(&db, &prod, Relationship::InfraManager)
                    .await
                    .unwrap(),
                1
            );
            let retry = endpoint_service::remove_endpoint(&db, &prod, "kubevirt").await;
            assert!(matches!(retry, Err(AppError::ManagerDeletion { .. })));

            containers::Entity::delete_by_id(blocker.id)
                .exec(&db)
                .await
                .unwrap();
            endpoint_service::remove_endpoint(&db, &prod, "kubevirt")
                .await
                .unwrap();
            assert_eq!(endpoint_roles(&db, &prod).await, vec!["default"]);
            assert_eq!(
                inventory_service::count(&db, &prod, Relationship::InfraManager)
                    .await
                    .unwrap(),
                0
            );
        }

        #[tokio::test]
        async fn test_add_endpoint_rolled_back_when_child_cannot_be_created() {
            let db = build_test_db().await;
            let prod = register(&db, "prod").await;

            // Имя будущего дочернего менеджера уже занято
            ext_management_systems::ActiveModel {
                id: Set(new_id()),
                name: Set("prod Virtualization Manager".into()),
                kind: Set(ManagerKind::Infra),
                parent_ems_id: Set(None),
                zone: Set(None),
                created_on: Set(ARCHIVED_ON.into()),
            }
            .insert(&db)
            .await
            .unwrap();

            let result = add_kubevirt(&db, &prod).await;
            assert!(matches!(result, Err(AppError::Conflict(_))));

            assert_eq!(endpoint_roles(&db, &prod).await, vec!["default"]);
            assert!(registry_service::child_managers(&db, &prod)
                .await
                .unwrap()
                .is_empty());
        }

        #[tokio::test]
        async fn test_one_child_manager_per_kind() {
            let db = build_test_db().await;
            let prod = register(&db, "prod").await;
            add_kubevirt(&db, &prod).await.unwrap();

            let second = ext_management_systems::ActiveModel {
                id: Set(new_id()),
                name: Set("prod Virtualization Manager 2".into()),
                kind: Set(ManagerKind::Infra),
                parent_ems_id: Set(Some(prod.clone())),
                zone: Set(None),
                created_on: Set(ARCHIVED_ON.into()),
            }
            .insert(&db)
            .await;
            let err = second.expect_err("второй infra-менеджер не должен сохраниться");
            assert!(matches!(
                err.sql_err(),
                Some(SqlErr::UniqueConstraintViolation(_))
            ));

            // Менеджер мониторинга у того же родителя допустим
            endpoint_service::add_endpoint(
                &db,
                &prod,
                EndpointData {
                    role: "prometheus_alerts".into(),
                    hostname: "alerts.prod.example.com".into(),
                    port: None,
                },
            )
            .await
            .unwrap();
            assert_eq!(
                registry_service::child_managers(&db, &prod)
                    .await
                    .unwrap()
                    .len(),
                2
            );
        }

        #[tokio::test]
        async fn test_unique_violation_maps_to_conflict() {
            let db = build_test_db().await;
            let prod = register(&db, "prod").await;

            // Вставка в обход проверки сервиса, как при гонке двух запросов
            let err = endpoints::ActiveModel {
                id: Set(new_id()),
                ems_id: Set(prod.clone()),
                role: Set("default".into()),
                hostname: Set("api.prod.example.com".into()),
                port: Set(None),
                created_on: Set(ARCHIVED_ON.into()),
            }
            .insert(&db)
            .await
            .expect_err("дубликат роли должен нарушать уникальный индекс");
            assert!(matches!(
                AppError::unique_conflict(err, || "дубликат".into()),
                AppError::Conflict(_)
            ));
            assert!(matches!(
                AppError::unique_conflict(sea_orm::DbErr::RecordNotFound("x".into()), || {
                    "дубликат".into()
                }),
                AppError::Database(_)
            ));
        }
    }
}
