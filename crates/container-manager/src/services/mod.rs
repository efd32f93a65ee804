//! Сервисы жизненного цикла менеджера и его инвентаря.

pub mod archive_service;
pub mod cascade_service;
pub mod endpoint_service;
pub mod inventory_service;
pub mod registry_service;

use crate::error::AppError;
use sea_orm::DatabaseTransaction;
use tracing::warn;

/// Зафиксировать транзакцию, если шаг завершился успешно, иначе откатить.
pub(crate) async fn finish<T>(
    txn: DatabaseTransaction,
    result: Result<T, AppError>,
) -> Result<T, AppError> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(e) => {
            warn!("Транзакция откачена: {e}");
            if let Err(rollback) = txn.rollback().await {
                warn!("Ошибка отката транзакции: {rollback}");
            }
            Err(e)
        }
    }
}
