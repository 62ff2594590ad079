//! Vehicle repository
//!
//! Handles the vehicle record table with these patterns:
//! - insert: conditional INSERT ... SELECT guarded by the active count
//! - close: conditional UPDATE guarded by `active = 1 AND exit_at IS NULL`
//! - plate uniqueness among active records comes from a partial index

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use parkctl_core::{Fee, NewVehicle, RecordId, VehicleRecord};

const COLUMNS: &str = "id, plate, model, color, entry_at, exit_at, fee_cents, active";

/// Vehicle row as stored
#[derive(Debug, Clone, FromRow)]
struct VehicleRow {
    id: i64,
    plate: String,
    model: String,
    color: String,
    entry_at: DateTime<Utc>,
    exit_at: Option<DateTime<Utc>>,
    fee_cents: Option<i64>,
    active: bool,
}

impl From<VehicleRow> for VehicleRecord {
    fn from(row: VehicleRow) -> Self {
        Self {
            id: row.id,
            plate: row.plate,
            model: row.model,
            color: row.color,
            entry_at: row.entry_at,
            exit_at: row.exit_at,
            fee_paid: row.fee_cents.map(Fee::from_cents),
            active: row.active,
        }
    }
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("conflict: {resource} '{key}' already exists")]
    Conflict { resource: &'static str, key: String },
}

/// Case-insensitive substring filters; `None` matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleSearch {
    pub model: Option<String>,
    pub color: Option<String>,
}

/// Vehicle repository
pub struct VehicleRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> VehicleRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an active record unless `capacity` active records already exist.
    ///
    /// Returns `Ok(None)` when the lot is full and `DbError::Conflict` when
    /// the plate already has an active record. The full check wins when
    /// both apply, since a filtered-out row never reaches the unique index.
    pub async fn insert_if_capacity(
        &self,
        vehicle: &NewVehicle,
        entry_at: DateTime<Utc>,
        capacity: u32,
    ) -> Result<Option<VehicleRecord>, DbError> {
        let sql = format!(
            r#"
            INSERT INTO vehicles (plate, model, color, entry_at, active)
            SELECT ?1, ?2, ?3, ?4, 1
            WHERE (SELECT COUNT(*) FROM vehicles WHERE active = 1) < ?5
            RETURNING {COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, VehicleRow>(&sql)
            .bind(vehicle.plate.as_str())
            .bind(&vehicle.model)
            .bind(&vehicle.color)
            .bind(entry_at)
            .bind(i64::from(capacity))
            .fetch_optional(self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => DbError::Conflict {
                    resource: "active plate",
                    key: vehicle.plate.to_string(),
                },
                other => DbError::Sqlx(other),
            })?;

        Ok(row.map(VehicleRecord::from))
    }

    /// Persist exit data for a still-active record.
    ///
    /// Returns `Ok(None)` if the record does not exist or was already closed.
    pub async fn close(
        &self,
        id: RecordId,
        exit_at: DateTime<Utc>,
        fee: Fee,
    ) -> Result<Option<VehicleRecord>, DbError> {
        let sql = format!(
            r#"
            UPDATE vehicles
            SET exit_at = ?2, fee_cents = ?3, active = 0
            WHERE id = ?1 AND active = 1 AND exit_at IS NULL
            RETURNING {COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, VehicleRow>(&sql)
            .bind(id)
            .bind(exit_at)
            .bind(fee.cents())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(VehicleRecord::from))
    }

    /// Get a single record by identity.
    pub async fn get(&self, id: RecordId) -> Result<Option<VehicleRecord>, DbError> {
        let sql = format!("SELECT {COLUMNS} FROM vehicles WHERE id = ?1");

        let row = sqlx::query_as::<_, VehicleRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(VehicleRecord::from))
    }

    /// Latest record for a normalized plate, preferring the active one.
    pub async fn find_by_plate(&self, plate: &str) -> Result<Option<VehicleRecord>, DbError> {
        let sql = format!(
            r#"
            SELECT {COLUMNS} FROM vehicles
            WHERE plate = ?1
            ORDER BY active DESC, entry_at DESC, id DESC
            LIMIT 1
            "#
        );

        let row = sqlx::query_as::<_, VehicleRow>(&sql)
            .bind(plate)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(VehicleRecord::from))
    }

    /// All records, newest entry first.
    pub async fn list_all(&self) -> Result<Vec<VehicleRecord>, DbError> {
        let sql = format!("SELECT {COLUMNS} FROM vehicles ORDER BY entry_at DESC, id DESC");

        let rows = sqlx::query_as::<_, VehicleRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(VehicleRecord::from).collect())
    }

    /// Parked vehicles, oldest entry first.
    pub async fn list_active(&self) -> Result<Vec<VehicleRecord>, DbError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM vehicles WHERE active = 1 ORDER BY entry_at ASC, id ASC"
        );

        let rows = sqlx::query_as::<_, VehicleRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(VehicleRecord::from).collect())
    }

    /// Records whose model and color contain the given fragments.
    ///
    /// Matching folds case with Unicode rules in Rust; SQLite's `LIKE`
    /// and `lower()` only fold ASCII.
    pub async fn search(&self, filter: &VehicleSearch) -> Result<Vec<VehicleRecord>, DbError> {
        let model = filter.model.as_deref().map(str::to_lowercase);
        let color = filter.color.as_deref().map(str::to_lowercase);

        let records = self.list_all().await?;

        Ok(records
            .into_iter()
            .filter(|r| contains_folded(&r.model, model.as_deref()))
            .filter(|r| contains_folded(&r.color, color.as_deref()))
            .collect())
    }

    pub async fn count_active(&self) -> Result<u32, DbError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles WHERE active = 1")
            .fetch_one(self.pool)
            .await?;

        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }
}

fn contains_folded(value: &str, needle: Option<&str>) -> bool {
    needle.map_or(true, |n| value.to_lowercase().contains(n))
}
