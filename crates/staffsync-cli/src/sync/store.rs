use sqlx::PgPool;
use staffsync_core::LocationRecord;
use staffsync_db::SnapshotStats;

/// Persistence seam for the location snapshot.
///
/// `replace` must be atomic: either the whole new set is stored or the
/// previous snapshot is kept.
pub(crate) trait SnapshotStore {
    async fn load(&self) -> anyhow::Result<Vec<LocationRecord>>;

    async fn replace(&self, locations: &[LocationRecord]) -> anyhow::Result<SnapshotStats>;
}

/// [`SnapshotStore`] backed by the `company_locations` table.
pub(crate) struct PgSnapshotStore {
    pool: PgPool,
}

impl PgSnapshotStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SnapshotStore for PgSnapshotStore {
    async fn load(&self) -> anyhow::Result<Vec<LocationRecord>> {
        Ok(staffsync_db::load_snapshot(&self.pool).await?)
    }

    async fn replace(&self, locations: &[LocationRecord]) -> anyhow::Result<SnapshotStats> {
        Ok(staffsync_db::replace_snapshot(&self.pool, locations).await?)
    }
}
