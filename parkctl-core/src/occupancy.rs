//! Aggregate occupancy snapshot

use serde::{Deserialize, Serialize};

/// Capacity versus currently parked vehicles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingInfo {
    pub total_capacity: u32,
    pub active_count: u32,
    /// Never negative, even if capacity was lowered below the active count
    pub available_slots: u32,
    pub has_space: bool,
}

impl ParkingInfo {
    pub fn new(total_capacity: u32, active_count: u32) -> Self {
        let available_slots = total_capacity.saturating_sub(active_count);
        Self {
            total_capacity,
            active_count,
            available_slots,
            has_space: available_slots > 0,
        }
    }
}
