//! Parking service - entry/exit transitions and queries over the store
//!
//! Cheap to clone; shares the underlying pool.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use parkctl_core::{
    FeePolicy, NewVehicle, ParkingConfig, ParkingError, ParkingInfo, Plate, RecordId,
    VehicleRecord,
};

use crate::db::repos::{DbError, VehicleRepo, VehicleSearch};

/// Service error: a domain rejection or a store failure
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Parking(#[from] ParkingError),

    #[error(transparent)]
    Database(#[from] DbError),
}

impl From<parkctl_core::ValidationError> for ServiceError {
    fn from(e: parkctl_core::ValidationError) -> Self {
        Self::Parking(e.into())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Entry/exit rules over the vehicle table
#[derive(Clone)]
pub struct ParkingService {
    pool: SqlitePool,
    capacity: u32,
    fees: FeePolicy,
}

impl ParkingService {
    pub fn new(pool: SqlitePool, config: &ParkingConfig) -> Self {
        Self {
            pool,
            capacity: config.capacity,
            fees: config.fees,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    fn repo(&self) -> VehicleRepo<'_> {
        VehicleRepo::new(&self.pool)
    }

    /// Register a vehicle entering now.
    pub async fn register_entry(&self, vehicle: NewVehicle) -> ServiceResult<VehicleRecord> {
        self.register_entry_at(vehicle, Utc::now()).await
    }

    /// Register a vehicle entering at `entry_at`.
    ///
    /// Fails with `CapacityExceeded` when the lot is full, then with
    /// `DuplicatePlate` when the plate is already parked.
    pub async fn register_entry_at(
        &self,
        vehicle: NewVehicle,
        entry_at: DateTime<Utc>,
    ) -> ServiceResult<VehicleRecord> {
        let inserted = match self
            .repo()
            .insert_if_capacity(&vehicle, entry_at, self.capacity)
            .await
        {
            Ok(inserted) => inserted,
            Err(DbError::Conflict { .. }) => {
                tracing::warn!(plate = %vehicle.plate, "entry rejected: plate already parked");
                return Err(ParkingError::duplicate_plate(vehicle.plate.into_string()).into());
            }
            Err(e) => return Err(e.into()),
        };

        let Some(record) = inserted else {
            tracing::warn!(plate = %vehicle.plate, capacity = self.capacity, "entry rejected: lot full");
            return Err(ParkingError::CapacityExceeded {
                capacity: self.capacity,
            }
            .into());
        };

        tracing::info!(id = record.id, plate = %record.plate, "entry registered");
        Ok(record)
    }

    /// Register the exit of record `id` now.
    pub async fn register_exit(&self, id: RecordId) -> ServiceResult<VehicleRecord> {
        self.register_exit_at(id, Utc::now()).await
    }

    /// Register the exit of record `id` at `exit_at`, charging the fee.
    pub async fn register_exit_at(
        &self,
        id: RecordId,
        exit_at: DateTime<Utc>,
    ) -> ServiceResult<VehicleRecord> {
        let repo = self.repo();

        let mut record = repo
            .get(id)
            .await?
            .ok_or(ParkingError::NotFound { id })?;

        let fee = record.close(exit_at, &self.fees).inspect_err(|_| {
            tracing::warn!(id, "exit rejected: already exited");
        })?;

        // A concurrent exit may have closed the record since it was read
        let closed = repo
            .close(id, exit_at, fee)
            .await?
            .ok_or(ParkingError::AlreadyExited { id })?;

        tracing::info!(id, plate = %closed.plate, fee = %fee, "exit registered");
        Ok(closed)
    }

    /// All records, newest entry first.
    pub async fn list_all(&self) -> ServiceResult<Vec<VehicleRecord>> {
        Ok(self.repo().list_all().await?)
    }

    /// Parked vehicles, oldest entry first.
    pub async fn list_active(&self) -> ServiceResult<Vec<VehicleRecord>> {
        Ok(self.repo().list_active().await?)
    }

    /// Look up by plate (normalized before the query).
    pub async fn find_by_plate(&self, plate: &str) -> ServiceResult<Option<VehicleRecord>> {
        let plate = Plate::new(plate)?;
        Ok(self.repo().find_by_plate(plate.as_str()).await?)
    }

    pub async fn find_by_id(&self, id: RecordId) -> ServiceResult<Option<VehicleRecord>> {
        Ok(self.repo().get(id).await?)
    }

    /// Case-insensitive model/color search; blank filters are ignored.
    pub async fn search(
        &self,
        model: Option<&str>,
        color: Option<&str>,
    ) -> ServiceResult<Vec<VehicleRecord>> {
        let clean = |s: Option<&str>| {
            s.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };
        let filter = VehicleSearch {
            model: clean(model),
            color: clean(color),
        };
        Ok(self.repo().search(&filter).await?)
    }

    /// Occupancy snapshot.
    pub async fn info(&self) -> ServiceResult<ParkingInfo> {
        let active = self.repo().count_active().await?;
        Ok(ParkingInfo::new(self.capacity, active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_memory;
    use chrono::{Duration, TimeZone};
    use parkctl_core::Fee;

    fn t(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn vehicle(plate: &str) -> NewVehicle {
        NewVehicle::new(plate, "Honda Civic", "Branco").unwrap()
    }

    async fn service(capacity: u32) -> ParkingService {
        let pool = connect_memory().await.unwrap();
        ParkingService::new(
            pool,
            &ParkingConfig {
                capacity,
                ..ParkingConfig::default()
            },
        )
    }

    #[tokio::test]
    async fn entry_fails_once_capacity_reached() {
        let svc = service(3).await;
        for i in 0..3 {
            svc.register_entry_at(vehicle(&format!("TST{:04}", i)), t(i))
                .await
                .unwrap();
        }

        let err = svc.register_entry(vehicle("TST9999")).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Parking(ParkingError::CapacityExceeded { capacity: 3 })
        ));
    }

    #[tokio::test]
    async fn exit_frees_a_slot() {
        let svc = service(1).await;
        let first = svc.register_entry_at(vehicle("AAA0001"), t(0)).await.unwrap();
        svc.register_exit_at(first.id, t(10)).await.unwrap();

        svc.register_entry_at(vehicle("AAA0002"), t(11)).await.unwrap();
    }

    #[tokio::test]
    async fn entry_fails_for_parked_plate() {
        let svc = service(10).await;
        svc.register_entry(vehicle("DEF5678")).await.unwrap();

        let err = svc
            .register_entry(NewVehicle::new("def5678", "Outro modelo", "Outra cor").unwrap())
            .await
            .unwrap_err();

        match err {
            ServiceError::Parking(ParkingError::DuplicatePlate { plate }) => {
                assert_eq!(plate, "DEF5678")
            }
            other => panic!("expected DuplicatePlate, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn exit_unknown_id_is_not_found() {
        let svc = service(10).await;
        let err = svc.register_exit(42).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Parking(ParkingError::NotFound { id: 42 })
        ));
    }

    #[tokio::test]
    async fn exit_twice_is_already_exited() {
        let svc = service(10).await;
        let record = svc.register_entry_at(vehicle("ABC1234"), t(0)).await.unwrap();
        svc.register_exit_at(record.id, t(5)).await.unwrap();

        let err = svc.register_exit_at(record.id, t(6)).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Parking(ParkingError::AlreadyExited { .. })
        ));
    }

    #[tokio::test]
    async fn short_stay_charges_minimum() {
        let svc = service(10).await;
        let record = svc.register_entry_at(vehicle("ABC1234"), t(0)).await.unwrap();

        let closed = svc.register_exit_at(record.id, t(30)).await.unwrap();
        assert_eq!(closed.fee_paid, Some(Fee::from_cents(500)));
    }

    #[tokio::test]
    async fn long_stay_charges_per_extra_minute() {
        let svc = service(10).await;
        let record = svc.register_entry_at(vehicle("ABC1234"), t(0)).await.unwrap();

        let closed = svc.register_exit_at(record.id, t(70)).await.unwrap();
        // 5.00 + 40 * 0.25
        assert_eq!(closed.fee_paid, Some(Fee::from_cents(1500)));
        assert_eq!(closed.exit_at, Some(t(70)));
        assert!(!closed.active);
    }

    #[tokio::test]
    async fn exited_record_leaves_active_listing_only() {
        let svc = service(10).await;
        let a = svc.register_entry_at(vehicle("AAA0001"), t(0)).await.unwrap();
        let b = svc.register_entry_at(vehicle("AAA0002"), t(1)).await.unwrap();
        svc.register_exit_at(a.id, t(40)).await.unwrap();

        let active = svc.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, b.id);

        let all = svc.list_all().await.unwrap();
        let exited = all.iter().find(|r| r.id == a.id).unwrap();
        assert_eq!(exited.fee_paid, Some(Fee::from_cents(750)));
        assert!(!exited.active);
    }

    #[tokio::test]
    async fn lookup_normalizes_plate() {
        let svc = service(10).await;
        svc.register_entry(vehicle("ghi9012")).await.unwrap();

        let found = svc.find_by_plate(" GHI9012 ").await.unwrap().unwrap();
        assert_eq!(found.plate, "GHI9012");
        assert!(svc.find_by_plate("ZZZ0000").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lookup_rejects_malformed_plate() {
        let svc = service(10).await;
        let err = svc.find_by_plate("no spaces").await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Parking(ParkingError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn info_tracks_occupancy() {
        let svc = service(2).await;
        assert_eq!(svc.info().await.unwrap(), ParkingInfo::new(2, 0));

        let a = svc.register_entry(vehicle("AAA0001")).await.unwrap();
        svc.register_entry(vehicle("AAA0002")).await.unwrap();
        let full = svc.info().await.unwrap();
        assert_eq!(full.available_slots, 0);
        assert!(!full.has_space);

        svc.register_exit(a.id).await.unwrap();
        let info = svc.info().await.unwrap();
        assert_eq!(info.active_count, 1);
        assert!(info.has_space);
    }

    #[tokio::test]
    async fn search_ignores_blank_filters() {
        let svc = service(10).await;
        svc.register_entry(vehicle("AAA0001")).await.unwrap();

        let hits = svc.search(Some("  "), None).await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn custom_fee_policy_applies() {
        let pool = connect_memory().await.unwrap();
        let svc = ParkingService::new(
            pool,
            &ParkingConfig {
                capacity: 5,
                fees: FeePolicy {
                    minimum_fee_cents: 200,
                    grace_minutes: 10,
                    per_minute_cents: 5,
                },
            },
        );

        let record = svc.register_entry_at(vehicle("ABC1234"), t(0)).await.unwrap();
        let closed = svc.register_exit_at(record.id, t(20)).await.unwrap();
        assert_eq!(closed.fee_paid, Some(Fee::from_cents(250)));
    }
}
