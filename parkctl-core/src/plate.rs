//! License plate normalization and entry input validation
//!
//! Plates are stored uppercase; every lookup goes through [`Plate::new`]
//! so `abc1234` and `ABC1234` name the same vehicle.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::validation::{required_text, ValidationError};

/// Maximum length for plates (matches the `vehicles.plate` CHECK constraint)
pub const MAX_PLATE_LEN: usize = 8;

/// Maximum length for vehicle model descriptions
pub const MAX_MODEL_LEN: usize = 50;

/// Maximum length for vehicle colors
pub const MAX_COLOR_LEN: usize = 30;

/// Uppercase alphanumeric, optional hyphens, starting with alphanumeric
static PLATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9][A-Z0-9-]{0,7}$").expect("invalid plate regex"));

/// Normalized license plate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Plate(String);

impl Plate {
    /// Normalize and validate a plate.
    ///
    /// # Rules
    /// - Surrounding whitespace is ignored
    /// - Letters are uppercased
    /// - Max 8 characters
    /// - ASCII letters, digits and hyphens, starting with a letter or digit
    ///
    /// # Example
    /// ```
    /// use parkctl_core::Plate;
    ///
    /// assert_eq!(Plate::new(" abc1234 ").unwrap().as_str(), "ABC1234");
    /// assert!(Plate::new("ABC 1234").is_err()); // inner space
    /// assert!(Plate::new("-ABC").is_err()); // starts with dash
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let normalized = s.trim().to_uppercase();

        if normalized.is_empty() {
            return Err(ValidationError::Empty { field: "plate" });
        }

        if normalized.chars().count() > MAX_PLATE_LEN {
            return Err(ValidationError::TooLong {
                field: "plate",
                max: MAX_PLATE_LEN,
            });
        }

        if !PLATE_RE.is_match(&normalized) {
            return Err(ValidationError::InvalidFormat {
                field: "plate",
                reason: "must be letters, digits or hyphens, starting with a letter or digit",
            });
        }

        Ok(Self(normalized))
    }

    /// Get the plate as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Plate {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<Plate> for String {
    fn from(p: Plate) -> Self {
        p.0
    }
}

impl AsRef<str> for Plate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated input for entry registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    pub plate: Plate,
    pub model: String,
    pub color: String,
}

impl NewVehicle {
    pub fn new(plate: &str, model: &str, color: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            plate: Plate::new(plate)?,
            model: required_text("model", model, MAX_MODEL_LEN)?,
            color: required_text("color", color, MAX_COLOR_LEN)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(Plate::new("abc1234").unwrap().as_str(), "ABC1234");
        assert_eq!(Plate::new("  xyz-9a  ").unwrap().as_str(), "XYZ-9A");
    }

    #[test]
    fn valid_plates() {
        assert!(Plate::new("ABC1234").is_ok());
        assert!(Plate::new("BRA2E19").is_ok());
        assert!(Plate::new("AB-1234").is_ok());
        assert!(Plate::new("A").is_ok());
    }

    #[test]
    fn rejects_inner_spaces() {
        let err = Plate::new("ABC 123").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn rejects_dash_start() {
        let err = Plate::new("-ABC123").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn rejects_empty() {
        let err = Plate::new("   ").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn max_length() {
        assert!(Plate::new("ABCD1234").is_ok());

        let err = Plate::new("ABCD12345").unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 8, .. }));
    }

    #[test]
    fn new_vehicle_validates_every_field() {
        let v = NewVehicle::new("abc1234", " Honda Civic ", "Branco").unwrap();
        assert_eq!(v.plate.as_str(), "ABC1234");
        assert_eq!(v.model, "Honda Civic");

        assert_eq!(
            NewVehicle::new("ABC1234", "", "Branco").unwrap_err(),
            ValidationError::Empty { field: "model" }
        );
        assert_eq!(
            NewVehicle::new("ABC1234", "Civic", &"x".repeat(31)).unwrap_err(),
            ValidationError::TooLong {
                field: "color",
                max: MAX_COLOR_LEN
            }
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let plate = Plate::new("abc1234").unwrap();
        assert_eq!(serde_json::to_string(&plate).unwrap(), "\"ABC1234\"");
    }

    #[test]
    fn deserialize_normalizes_and_validates() {
        let plate: Plate = serde_json::from_str("\"abc1234\"").unwrap();
        assert_eq!(plate.as_str(), "ABC1234");
        assert_eq!(serde_json::to_string(&plate).unwrap(), "\"ABC1234\"");

        assert!(serde_json::from_str::<Plate>("\"ABC 123\"").is_err());
    }
}
