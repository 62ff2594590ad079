//! Validation error types

use std::fmt;

/// Validation error for vehicle input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty (after trimming) when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim `value` and check it is non-empty and at most `max` characters.
pub(crate) fn required_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "model",
            max: 50,
        };
        assert_eq!(
            err.to_string(),
            "model exceeds maximum length of 50 characters"
        );
    }

    #[test]
    fn required_text_trims() {
        assert_eq!(required_text("color", "  Prata ", 30).unwrap(), "Prata");
    }

    #[test]
    fn required_text_counts_chars_not_bytes() {
        // 3 chars, 6 bytes
        assert!(required_text("color", "ÁÉÍ", 3).is_ok());
        assert!(matches!(
            required_text("color", "ÁÉÍÓ", 3),
            Err(ValidationError::TooLong { max: 3, .. })
        ));
    }

    #[test]
    fn required_text_rejects_blank() {
        assert_eq!(
            required_text("model", "   ", 50),
            Err(ValidationError::Empty { field: "model" })
        );
    }
}
