//! parkctl-core: domain model for the parking facility tracker
//!
//! Everything here is storage-agnostic. The server crate persists
//! [`VehicleRecord`]s and drives the entry/exit transitions defined here.

pub mod config;
pub mod error;
pub mod fee;
pub mod occupancy;
pub mod plate;
pub mod record;
pub mod validation;

pub use config::{DatabaseConfig, ParkctlConfig, ParkingConfig, ServerSection};
pub use error::{ParkingError, Result};
pub use fee::{Fee, FeePolicy};
pub use occupancy::ParkingInfo;
pub use plate::{NewVehicle, Plate};
pub use record::{RecordId, VehicleRecord};
pub use validation::ValidationError;
