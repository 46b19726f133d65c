//! Snapshot store for the `company_locations` table.
//!
//! The table holds the last known remote state. It is never patched: every
//! sync run replaces the whole set in one transaction, so a failed or
//! interrupted run leaves the previous snapshot intact.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use staffsync_core::{CompanyRef, LocationRecord};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `company_locations` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CompanyLocationRow {
    pub id: String,
    pub name: String,
    pub company_id: String,
    pub company_name: String,
    pub synced_at: DateTime<Utc>,
}

impl From<CompanyLocationRow> for LocationRecord {
    fn from(row: CompanyLocationRow) -> Self {
        LocationRecord {
            id: row.id,
            name: row.name,
            company: CompanyRef {
                id: row.company_id,
                name: row.company_name,
            },
        }
    }
}

/// Row counts produced by [`replace_snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotStats {
    pub deleted: u64,
    pub inserted: u64,
}

// ---------------------------------------------------------------------------
// Read operations
// ---------------------------------------------------------------------------

/// Loads the full stored snapshot, ordered by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn load_snapshot(pool: &PgPool) -> Result<Vec<LocationRecord>, DbError> {
    let rows = sqlx::query_as::<_, CompanyLocationRow>(
        "SELECT id, name, company_id, company_name, synced_at \
         FROM company_locations \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(LocationRecord::from).collect())
}

/// Loads raw snapshot rows including `synced_at`, for operator listings.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_snapshot_rows(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<CompanyLocationRow>, DbError> {
    let rows = sqlx::query_as::<_, CompanyLocationRow>(
        "SELECT id, name, company_id, company_name, synced_at \
         FROM company_locations \
         ORDER BY company_name, name \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the number of stored locations.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_snapshot(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM company_locations")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

// ---------------------------------------------------------------------------
// Write operations
// ---------------------------------------------------------------------------

/// Replaces the stored snapshot with `locations`: delete every row, then
/// insert the new set, inside a single transaction.
///
/// Rows are inserted with one `UNNEST` statement. Duplicate ids within
/// `locations` keep the first occurrence.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails; the transaction is
/// rolled back and the previous snapshot is kept.
pub async fn replace_snapshot(
    pool: &PgPool,
    locations: &[LocationRecord],
) -> Result<SnapshotStats, DbError> {
    let mut ids = Vec::with_capacity(locations.len());
    let mut names = Vec::with_capacity(locations.len());
    let mut company_ids = Vec::with_capacity(locations.len());
    let mut company_names = Vec::with_capacity(locations.len());
    for loc in locations {
        ids.push(loc.id.as_str());
        names.push(loc.name.as_str());
        company_ids.push(loc.company.id.as_str());
        company_names.push(loc.company.name.as_str());
    }

    let mut tx = pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM company_locations")
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let inserted = sqlx::query(
        "INSERT INTO company_locations (id, name, company_id, company_name, synced_at) \
         SELECT t.id, t.name, t.company_id, t.company_name, NOW() \
         FROM UNNEST($1::text[], $2::text[], $3::text[], $4::text[]) \
              AS t(id, name, company_id, company_name) \
         ON CONFLICT (id) DO NOTHING",
    )
    .bind(&ids)
    .bind(&names)
    .bind(&company_ids)
    .bind(&company_names)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    tx.commit().await?;

    Ok(SnapshotStats { deleted, inserted })
}
