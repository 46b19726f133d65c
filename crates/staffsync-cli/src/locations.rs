//! `locations` command handlers: read-only views of the stored snapshot.

use clap::Subcommand;

/// Sub-commands available under `locations`.
#[derive(Debug, Subcommand)]
pub enum LocationsCommands {
    /// List stored company locations ordered by company then location name
    List {
        /// Maximum number of rows to print
        #[arg(long, default_value_t = 50)]
        limit: i64,
    },
}

pub(crate) async fn run_locations_command(
    config: &staffsync_core::AppConfig,
    command: LocationsCommands,
) -> anyhow::Result<()> {
    let pool = staffsync_db::connect_pool_from_config(config).await?;
    let result = match command {
        LocationsCommands::List { limit } => run_locations_list(&pool, limit).await,
    };
    pool.close().await;
    result
}

/// Print the stored snapshot as a table, up to `limit` rows.
///
/// # Errors
///
/// Returns an error if the database query fails.
async fn run_locations_list(pool: &sqlx::PgPool, limit: i64) -> anyhow::Result<()> {
    let total = staffsync_db::count_snapshot(pool).await?;
    let rows = staffsync_db::list_snapshot_rows(pool, limit.max(1)).await?;

    if rows.is_empty() {
        println!("no company locations stored; run `sync` first");
        return Ok(());
    }

    println!(
        "{:<30}{:<30}{:<18}LOCATION ID",
        "COMPANY", "LOCATION", "SYNCED"
    );
    for row in &rows {
        println!(
            "{:<30}{:<30}{:<18}{}",
            truncate(&row.company_name, 28),
            truncate(&row.name, 28),
            row.synced_at.format("%Y-%m-%d %H:%M"),
            row.id
        );
    }
    println!("showing {} of {total} stored location(s)", rows.len());

    Ok(())
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() > max_chars {
        format!("{}...", value.chars().take(max_chars - 3).collect::<String>())
    } else {
        value.to_owned()
    }
}
