use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use store_api::{config, db, migrator::Migrator};

#[derive(Parser)]
#[command(name = "migration", about = "Manage the store database schema", version)]
struct Cli {
    #[arg(long, help = "Database URL; defaults to the loaded configuration")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Apply all pending migrations
    Up,
    /// Roll back applied migrations
    Down {
        #[arg(long, default_value_t = 1, help = "Number of migrations to roll back")]
        steps: u32,
    },
    /// Drop every table and re-apply all migrations
    Fresh,
    /// Print the state of each migration
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load_config().context("failed to load configuration")?;
    config::init_tracing(&cfg.log_level, cfg.log_json);
    if let Some(url) = cli.database_url {
        cfg.database_url = url;
    }

    let pool = db::establish_connection_from_app_config(&cfg)
        .await
        .context("failed to connect to the database")?;
    let schema = cfg.db_schema.as_deref();

    match cli.command.unwrap_or(Command::Up) {
        Command::Up => {
            db::run_migrations(&pool, schema).await?;
        }
        Command::Down { steps } => {
            info!(steps, "Rolling back migrations");
            Migrator::down(&pool, Some(steps)).await?;
        }
        Command::Fresh => {
            db::ensure_schema(&pool, schema).await?;
            info!("Dropping all tables and re-applying migrations");
            Migrator::fresh(&pool).await?;
        }
        Command::Status => {
            Migrator::status(&pool).await?;
        }
    }

    info!("Migration command completed");
    Ok(())
}
