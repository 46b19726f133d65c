//! Sync orchestration: `FETCH_REMOTE -> LOAD_SNAPSHOT -> DIFF -> DISPATCH ->
//! REPLACE_SNAPSHOT`.

use anyhow::Context as _;
use futures::stream::{self, StreamExt};
use staffsync_core::{detect_new_locations, LocationRecord};
use staffsync_db::SnapshotStats;
use staffsync_shopify::AdminClient;

use super::dispatch::{AssignServiceClient, DispatchOutcome};
use super::store::SnapshotStore;

#[derive(Debug, Clone, Copy)]
pub(crate) struct SyncOptions {
    /// Maximum in-flight dispatches. Values below 1 are treated as 1.
    pub dispatch_concurrency: usize,
    pub dry_run: bool,
}

/// Counters for one sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SyncReport {
    pub dry_run: bool,
    pub remote_count: usize,
    pub stored_count: usize,
    pub new_count: usize,
    pub dispatched: usize,
    pub failed: usize,
    /// Location ids whose dispatch failed, in remote order.
    pub failed_ids: Vec<String>,
    /// `None` on a dry run.
    pub snapshot: Option<SnapshotStats>,
}

/// Runs one sync pass.
///
/// Fetch and snapshot-load failures abort the run before anything is
/// dispatched or written. Dispatch failures are logged and counted but never
/// stop the remaining dispatches or the snapshot replacement, so a location
/// whose dispatch failed is still recorded as known.
///
/// # Errors
///
/// Returns an error if the remote fetch, the snapshot load, or the snapshot
/// replacement fails.
pub(crate) async fn run_sync<S: SnapshotStore>(
    shopify: &AdminClient,
    dispatcher: &AssignServiceClient,
    store: &S,
    options: SyncOptions,
) -> anyhow::Result<SyncReport> {
    tracing::info!(dry_run = options.dry_run, "sync run started");

    match run_sync_inner(shopify, dispatcher, store, options).await {
        Ok(report) => {
            tracing::info!(
                remote = report.remote_count,
                stored = report.stored_count,
                new = report.new_count,
                dispatched = report.dispatched,
                failed = report.failed,
                dry_run = report.dry_run,
                "sync run completed"
            );
            if report.failed > 0 {
                tracing::warn!(
                    failed = report.failed,
                    failed_ids = ?report.failed_ids,
                    "some dispatches failed; these locations will not be retried automatically"
                );
            }
            Ok(report)
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "sync run aborted");
            Err(e)
        }
    }
}

async fn run_sync_inner<S: SnapshotStore>(
    shopify: &AdminClient,
    dispatcher: &AssignServiceClient,
    store: &S,
    options: SyncOptions,
) -> anyhow::Result<SyncReport> {
    let remote = shopify
        .fetch_all_company_locations()
        .await
        .context("fetching company locations")?;
    let stored = store
        .load()
        .await
        .context("loading stored snapshot")?;

    let new_locations = detect_new_locations(&remote, &stored);
    tracing::info!(
        remote = remote.len(),
        stored = stored.len(),
        new = new_locations.len(),
        "diffed remote locations against snapshot"
    );

    if options.dry_run {
        for loc in &new_locations {
            tracing::info!(
                location_id = %loc.id,
                location = %loc.name,
                company = %loc.company.name,
                "would dispatch new location"
            );
        }
        return Ok(SyncReport {
            dry_run: true,
            remote_count: remote.len(),
            stored_count: stored.len(),
            new_count: new_locations.len(),
            dispatched: 0,
            failed: 0,
            failed_ids: Vec::new(),
            snapshot: None,
        });
    }

    let outcomes = dispatch_all(dispatcher, &new_locations, options.dispatch_concurrency).await;
    let failed_ids: Vec<String> = outcomes
        .iter()
        .filter(|(_, outcome)| !outcome.is_assigned())
        .map(|(loc, _)| loc.id.clone())
        .collect();

    let snapshot = store
        .replace(&remote)
        .await
        .context("replacing stored snapshot")?;
    tracing::debug!(
        deleted = snapshot.deleted,
        inserted = snapshot.inserted,
        "snapshot replaced"
    );

    Ok(SyncReport {
        dry_run: false,
        remote_count: remote.len(),
        stored_count: stored.len(),
        new_count: new_locations.len(),
        dispatched: outcomes.len() - failed_ids.len(),
        failed: failed_ids.len(),
        failed_ids,
        snapshot: Some(snapshot),
    })
}

/// Dispatches every location with at most `concurrency` requests in flight.
///
/// Results are returned in input order regardless of completion order.
async fn dispatch_all<'a>(
    dispatcher: &AssignServiceClient,
    locations: &'a [LocationRecord],
    concurrency: usize,
) -> Vec<(&'a LocationRecord, DispatchOutcome)> {
    let mut results: Vec<(usize, &LocationRecord, DispatchOutcome)> =
        stream::iter(locations.iter().enumerate())
            .map(|(idx, loc)| async move {
                let outcome = dispatcher.dispatch(&loc.id).await;
                match &outcome {
                    DispatchOutcome::Assigned { status } => {
                        tracing::info!(
                            location_id = %loc.id,
                            location = %loc.name,
                            company = %loc.company.name,
                            status,
                            "dispatched staff assignment"
                        );
                    }
                    DispatchOutcome::Failed { reason } => {
                        tracing::warn!(
                            location_id = %loc.id,
                            location = %loc.name,
                            company = %loc.company.name,
                            reason = %reason,
                            "staff assignment dispatch failed"
                        );
                    }
                }
                (idx, loc, outcome)
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

    results.sort_by_key(|(idx, _, _)| *idx);
    results
        .into_iter()
        .map(|(_, loc, outcome)| (loc, outcome))
        .collect()
}
