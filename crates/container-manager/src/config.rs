//! Конфигурация менеджера контейнеров.

#[derive(Debug, Clone)]
pub struct Config {
    /// URL подключения к БД (sqlite или postgres)
    pub db_url: String,

    /// Формат вывода команд
    pub output: OutputFormat,

    /// Выполнять миграции при подключении
    pub run_migrations: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_url: "sqlite:./container-manager.db?mode=rwc".to_string(),
            output: OutputFormat::Table,
            run_migrations: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "Неизвестный формат вывода: {other}. Допустимые: table, json"
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
