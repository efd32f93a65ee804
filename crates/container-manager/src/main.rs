//! Точка входа CLI менеджера контейнеров.

use clap::{Parser, Subcommand};
use container_manager::config::{Config, OutputFormat};
use container_manager::manager::display_name;
use container_manager::schema::{self, Relationship};
use container_manager::services::archive_service::{self, Archivable};
use container_manager::services::endpoint_service::{self, EndpointData};
use container_manager::services::registry_service::{self, RegisterData};
use container_manager::services::{cascade_service, inventory_service};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "container-manager",
    about = "Управление менеджерами контейнеров и их инвентарём"
)]
struct Cli {
    /// URL базы данных
    #[arg(
        long,
        global = true,
        default_value = "sqlite:./container-manager.db?mode=rwc",
        env = "DATABASE_URL"
    )]
    db_url: String,

    /// Формат вывода: table, json
    #[arg(long, global = true, default_value = "table")]
    output: String,

    /// Не выполнять миграции при запуске
    #[arg(long, global = true)]
    skip_migrations: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Зарегистрировать менеджер
    Register {
        name: String,
        #[arg(long)]
        hostname: String,
        #[arg(long)]
        port: Option<i32>,
        #[arg(long)]
        zone: Option<String>,
    },
    /// Список менеджеров
    List,
    /// Показать менеджер и размеры его связей
    Show { id: String },
    /// Удалить менеджер со всеми зависимыми данными
    Delete { id: String },
    /// Endpoints менеджера
    #[command(subcommand)]
    Endpoint(EndpointCommand),
    /// Строки одной связи менеджера
    Inventory { id: String, relationship: String },
    /// Заархивировать запись инвентаря
    Archive { table: String, id: String },
    /// Вернуть запись инвентаря в активные
    Unarchive { table: String, id: String },
    /// Каталог связей
    Relationships,
}

#[derive(Subcommand)]
enum EndpointCommand {
    Add {
        id: String,
        role: String,
        #[arg(long)]
        hostname: String,
        #[arg(long)]
        port: Option<i32>,
    },
    Remove {
        id: String,
        role: String,
    },
    List {
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Инициализация логгера
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let output: OutputFormat = cli
        .output
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let config = Config {
        db_url: cli.db_url,
        output,
        run_migrations: !cli.skip_migrations,
    };

    // Каталог связей не требует БД
    if let Command::Relationships = cli.command {
        return print_relationships(config.output);
    }

    let db = container_manager::connect(&config).await?;

    match cli.command {
        Command::Register {
            name,
            hostname,
            port,
            zone,
        } => {
            let manager = registry_service::register_manager(
                &db,
                RegisterData {
                    name,
                    hostname,
                    port,
                    zone,
                },
            )
            .await?;
            println!("{}", manager.id());
        }
        Command::List => {
            let managers = registry_service::list_managers(&db).await?;
            match config.output {
                OutputFormat::Json => print_json(&managers)?,
                OutputFormat::Table => {
                    println!("{} {}", managers.len(), display_name(managers.len() as u64));
                    for m in managers {
                        println!("{}\t{}\t{}", m.id, m.name, m.zone.unwrap_or_default());
                    }
                }
            }
        }
        Command::Show { id } => {
            let manager = registry_service::load_manager(&db, &id).await?;
            let summary = inventory_service::summary(&db, &id).await?;
            match config.output {
                OutputFormat::Json => {
                    let counts: serde_json::Map<String, serde_json::Value> = summary
                        .iter()
                        .map(|(r, n)| (r.name().to_string(), (*n).into()))
                        .collect();
                    print_json(&serde_json::json!({
                        "manager": manager.record,
                        "port": manager.port_display(),
                        "relationships": counts,
                    }))?;
                }
                OutputFormat::Table => {
                    println!("{}: {}", display_name(1), manager.record.name);
                    println!("id:   {}", manager.id());
                    println!("port: {}", manager.port_display());
                    for (relationship, n) in summary {
                        println!("  {relationship:<36} {n}");
                    }
                }
            }
        }
        Command::Delete { id } => {
            let report = cascade_service::destroy_manager(&db, &id).await?;
            match config.output {
                OutputFormat::Json => print_json(&report)?,
                OutputFormat::Table => {
                    for (table, n) in &report.removed {
                        if *n > 0 {
                            println!("  {table:<36} {n}");
                        }
                    }
                    println!("Удалено строк: {}", report.total());
                }
            }
        }
        Command::Endpoint(EndpointCommand::Add {
            id,
            role,
            hostname,
            port,
        }) => {
            let endpoint = endpoint_service::add_endpoint(
                &db,
                &id,
                EndpointData {
                    role,
                    hostname,
                    port,
                },
            )
            .await?;
            println!("{}", endpoint.id);
        }
        Command::Endpoint(EndpointCommand::Remove { id, role }) => {
            endpoint_service::remove_endpoint(&db, &id, &role).await?;
        }
        Command::Endpoint(EndpointCommand::List { id }) => {
            let endpoints = endpoint_service::list_endpoints(&db, &id).await?;
            match config.output {
                OutputFormat::Json => print_json(&endpoints)?,
                OutputFormat::Table => {
                    for e in endpoints {
                        let port = e.port.map(|p| p.to_string()).unwrap_or_default();
                        println!("{}\t{}\t{}", e.role, e.hostname, port);
                    }
                }
            }
        }
        Command::Inventory { id, relationship } => {
            let relationship: Relationship =
                relationship.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            registry_service::get_manager(&db, &id).await?;
            let rows = inventory_service::load(&db, &id, relationship).await?;
            print_json(&rows)?;
        }
        Command::Archive { table, id } => {
            let table: Archivable = table.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            archive_service::archive(&db, table, &id).await?;
        }
        Command::Unarchive { table, id } => {
            let table: Archivable = table.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            archive_service::unarchive(&db, table, &id).await?;
        }
        Command::Relationships => print_relationships(config.output)?,
    }

    Ok(())
}

fn print_relationships(output: OutputFormat) -> anyhow::Result<()> {
    match output {
        OutputFormat::Json => print_json(&schema::relationships()),
        OutputFormat::Table => {
            for d in schema::relationships() {
                println!(
                    "{:<36} {:<32} {:<18} {:?}/{:?}",
                    d.name, d.target, d.foreign_key, d.scope, d.dependent
                );
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
