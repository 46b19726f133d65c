//! The `sync` command: fetch remote locations, diff against the stored
//! snapshot, dispatch staff assignment for each new location, then replace
//! the snapshot.

mod dispatch;
mod runner;
mod store;

use staffsync_core::AppConfig;
use staffsync_shopify::AdminClient;

use dispatch::AssignServiceClient;
use runner::{run_sync, SyncOptions};
use store::PgSnapshotStore;

/// Entry point for `staffsync-cli sync`.
///
/// Both HTTP clients are built before the pool is opened, and the pool is
/// closed whether or not the run succeeds.
///
/// # Errors
///
/// Returns an error if a client cannot be built, the database is
/// unreachable, or the run aborts during fetch, snapshot load, or snapshot
/// replacement.
pub(crate) async fn run_sync_command(config: &AppConfig, dry_run: bool) -> anyhow::Result<()> {
    let shopify = AdminClient::from_app_config(config)?;
    let dispatcher = AssignServiceClient::from_app_config(config)?;
    let options = SyncOptions {
        dispatch_concurrency: config.dispatch_concurrency,
        dry_run,
    };

    let pool = staffsync_db::connect_pool_from_config(config).await?;
    let store = PgSnapshotStore::new(pool.clone());
    let result = run_sync(&shopify, &dispatcher, &store, options).await;
    pool.close().await;

    let report = result?;
    println!(
        "{}remote={} stored={} new={} dispatched={} failed={}",
        if report.dry_run { "[dry-run] " } else { "" },
        report.remote_count,
        report.stored_count,
        report.new_count,
        report.dispatched,
        report.failed,
    );
    if let Some(stats) = report.snapshot {
        println!(
            "snapshot replaced: {} removed, {} stored",
            stats.deleted, stats.inserted
        );
    }
    for id in &report.failed_ids {
        println!("  dispatch failed: {id}");
    }
    Ok(())
}
