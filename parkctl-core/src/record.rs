//! Vehicle parking record and its single state transition

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParkingError;
use crate::fee::{Fee, FeePolicy};

/// Surrogate identity assigned by the store
pub type RecordId = i64;

/// One stay of one vehicle in the facility.
///
/// Created active on entry; closed exactly once on exit, which sets
/// `exit_at` and `fee_paid` together and clears `active`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub id: RecordId,
    pub plate: String,
    pub model: String,
    pub color: String,
    pub entry_at: DateTime<Utc>,
    pub exit_at: Option<DateTime<Utc>>,
    pub fee_paid: Option<Fee>,
    pub active: bool,
}

impl VehicleRecord {
    /// True while the vehicle is parked.
    pub fn is_parked(&self) -> bool {
        self.active && self.exit_at.is_none()
    }

    /// Time spent in the facility so far, or in total once exited.
    pub fn stay_duration(&self, now: DateTime<Utc>) -> Duration {
        self.exit_at.unwrap_or(now) - self.entry_at
    }

    /// Register the exit at `exit_at`, returning the fee charged.
    ///
    /// Fails with [`ParkingError::AlreadyExited`] if the record is inactive or
    /// already carries exit data; the record is left untouched in that case.
    pub fn close(
        &mut self,
        exit_at: DateTime<Utc>,
        policy: &FeePolicy,
    ) -> Result<Fee, ParkingError> {
        if !self.is_parked() {
            return Err(ParkingError::AlreadyExited { id: self.id });
        }

        let fee = policy.fee_for(self.entry_at, exit_at);
        self.exit_at = Some(exit_at);
        self.fee_paid = Some(fee);
        self.active = false;
        Ok(fee)
    }
}
