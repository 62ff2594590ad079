//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Constraint violations surface as `DbError::Conflict` (no check-then-insert)
//! - State transitions are single conditional statements

pub mod vehicles;

pub use vehicles::{DbError, VehicleRepo, VehicleSearch};
