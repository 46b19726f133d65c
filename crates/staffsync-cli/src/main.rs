mod locations;
mod sync;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::locations::LocationsCommands;

#[derive(Debug, Parser)]
#[command(name = "staffsync-cli")]
#[command(about = "Company location sync and staff assignment")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch company locations, assign staff to new ones, and refresh the snapshot
    Sync {
        /// Report new locations without dispatching or writing the snapshot
        #[arg(long)]
        dry_run: bool,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Inspect the stored location snapshot
    Locations {
        #[command(subcommand)]
        command: LocationsCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("staffsync-cli: no command given; run with --help for usage");
        return Ok(());
    };

    let config = staffsync_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match command {
        Commands::Sync { dry_run } => sync::run_sync_command(&config, dry_run).await,
        Commands::Db { command } => run_db_command(&config, command).await,
        Commands::Locations { command } => {
            locations::run_locations_command(&config, command).await
        }
    }
}

async fn run_db_command(
    config: &staffsync_core::AppConfig,
    command: DbCommands,
) -> anyhow::Result<()> {
    let pool = staffsync_db::connect_pool_from_config(config).await?;

    let result = match command {
        DbCommands::Ping => staffsync_db::ping(&pool)
            .await
            .map(|()| println!("database connection ok"))
            .map_err(anyhow::Error::from),
        DbCommands::Migrate => staffsync_db::run_migrations(&pool)
            .await
            .map(|applied| println!("applied {applied} migration(s)"))
            .map_err(anyhow::Error::from),
    };

    pool.close().await;
    result
}

#[cfg(test)]
mod tests;
