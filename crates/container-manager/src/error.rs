//! Типы ошибок менеджера контейнеров.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Не найдено: {0}")]
    NotFound(String),

    #[error("Конфликт: {0}")]
    Conflict(String),

    #[error("Неверный запрос: {0}")]
    BadRequest(String),

    /// Каскадное удаление откачено целиком; ни одна строка не удалена.
    #[error("Не удалось удалить менеджер {id}: {source}")]
    ManagerDeletion {
        id: String,
        #[source]
        source: DbErr,
    },

    /// Ошибки слоя хранения передаются без изменений.
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl AppError {
    /// Нарушение уникального индекса становится [`AppError::Conflict`],
    /// остальные ошибки БД передаются как есть.
    pub fn unique_conflict(err: DbErr, message: impl FnOnce() -> String) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(message()),
            _ => AppError::Database(err),
        }
    }
}
