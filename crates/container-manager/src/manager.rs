//! Менеджер контейнеров: запись, основной endpoint и набор возможностей.

use crate::capability::{Feature, MonitoringCapability, VirtualizationCapability};
use crate::error::AppError;
use container_entities::{endpoints, ext_management_systems};
use sea_orm::DatabaseTransaction;
use std::sync::Arc;
use tracing::debug;

/// Подпись менеджера с учётом числа.
pub fn display_name(count: u64) -> &'static str {
    if count == 1 {
        "Containers Manager"
    } else {
        "Containers Managers"
    }
}

/// Менеджер контейнеров с подключёнными возможностями.
#[derive(Clone)]
pub struct ContainerManager {
    pub record: ext_management_systems::Model,
    pub default_endpoint: Option<endpoints::Model>,
    monitoring: Option<Arc<dyn MonitoringCapability>>,
    virtualization: Option<Arc<dyn VirtualizationCapability>>,
}

impl ContainerManager {
    /// Менеджер без возможностей мониторинга и виртуализации.
    pub fn new(
        record: ext_management_systems::Model,
        default_endpoint: Option<endpoints::Model>,
    ) -> Self {
        Self {
            record,
            default_endpoint,
            monitoring: None,
            virtualization: None,
        }
    }

    pub fn with_monitoring(mut self, capability: Arc<dyn MonitoringCapability>) -> Self {
        self.monitoring = Some(capability);
        self
    }

    pub fn with_virtualization(mut self, capability: Arc<dyn VirtualizationCapability>) -> Self {
        self.virtualization = Some(capability);
        self
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn has_monitoring(&self) -> bool {
        self.monitoring.is_some()
    }

    pub fn has_virtualization(&self) -> bool {
        self.virtualization.is_some()
    }

    /// Порт основного endpoint.
    pub fn port(&self) -> Option<i32> {
        self.default_endpoint.as_ref().and_then(|e| e.port)
    }

    /// Порт для отображения; пустая строка если порт не задан.
    pub fn port_display(&self) -> String {
        self.port().map(|p| p.to_string()).unwrap_or_default()
    }

    pub fn supports(&self, feature: Feature) -> bool {
        match feature {
            Feature::AuthenticationStatus | Feature::Metrics | Feature::Performance => true,
        }
    }

    /// Хук создания endpoint: мониторинг, затем виртуализация.
    ///
    /// Вызывается в транзакции, сохраняющей endpoint.
    pub async fn on_endpoint_created(
        &self,
        txn: &DatabaseTransaction,
        role: &str,
    ) -> Result<(), AppError> {
        debug!("endpoint_created: {} (role: {role})", self.record.id);
        if let Some(monitoring) = &self.monitoring {
            monitoring
                .monitoring_endpoint_created(txn, &self.record, role)
                .await?;
        }
        if let Some(virtualization) = &self.virtualization {
            virtualization
                .virtualization_endpoint_created(txn, &self.record, role)
                .await?;
        }
        Ok(())
    }

    /// Хук удаления endpoint.
    pub async fn on_endpoint_destroyed(
        &self,
        txn: &DatabaseTransaction,
        role: &str,
    ) -> Result<(), AppError> {
        debug!("endpoint_destroyed: {} (role: {role})", self.record.id);
        if let Some(monitoring) = &self.monitoring {
            monitoring
                .monitoring_endpoint_destroyed(txn, &self.record, role)
                .await?;
        }
        if let Some(virtualization) = &self.virtualization {
            virtualization
                .virtualization_endpoint_destroyed(txn, &self.record, role)
                .await?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for ContainerManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerManager")
            .field("record", &self.record)
            .field("default_endpoint", &self.default_endpoint)
            .field("monitoring", &self.has_monitoring())
            .field("virtualization", &self.has_virtualization())
            .finish()
    }
}
