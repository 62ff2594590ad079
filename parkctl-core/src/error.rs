/// Structured error types for parking operations.
///
/// Every variant is a client-visible failure. Storage failures live in
/// the server crate and never reach this type.
use thiserror::Error;

use crate::record::RecordId;
use crate::validation::ValidationError;

/// Domain error for entry/exit registration and lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParkingError {
    /// Active record count already equals the configured capacity
    #[error("parking lot is full (capacity: {capacity} vehicles)")]
    CapacityExceeded { capacity: u32 },

    /// An active record with the same normalized plate exists
    #[error("vehicle with plate {plate} is already parked")]
    DuplicatePlate { plate: String },

    /// No record with this identity
    #[error("vehicle record {id} not found")]
    NotFound { id: RecordId },

    /// Exit was already registered for this record
    #[error("exit already registered for vehicle record {id}")]
    AlreadyExited { id: RecordId },

    /// Input rejected before touching the store
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type alias for parkctl-core operations
pub type Result<T> = std::result::Result<T, ParkingError>;

impl ParkingError {
    pub fn duplicate_plate(plate: impl Into<String>) -> Self {
        Self::DuplicatePlate {
            plate: plate.into(),
        }
    }

    /// Stable machine-readable code, used as the `error` field of API bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::CapacityExceeded { .. } => "capacity_exceeded",
            Self::DuplicatePlate { .. } => "duplicate_plate",
            Self::NotFound { .. } => "not_found",
            Self::AlreadyExited { .. } => "already_exited",
            Self::Validation(_) => "validation_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParkingError::CapacityExceeded { capacity: 10 };
        assert_eq!(
            err.to_string(),
            "parking lot is full (capacity: 10 vehicles)"
        );

        let err = ParkingError::duplicate_plate("ABC1234");
        assert_eq!(err.to_string(), "vehicle with plate ABC1234 is already parked");
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: ParkingError = ValidationError::Empty { field: "plate" }.into();
        assert!(matches!(err, ParkingError::Validation(_)));
        assert_eq!(err.to_string(), "plate cannot be empty");
        assert_eq!(err.code(), "validation_error");
    }

    #[test]
    fn codes_are_distinct() {
        let codes = [
            ParkingError::CapacityExceeded { capacity: 1 }.code(),
            ParkingError::duplicate_plate("X").code(),
            ParkingError::NotFound { id: 1 }.code(),
            ParkingError::AlreadyExited { id: 1 }.code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
