//! Parking fee calculation
//!
//! Stays up to `grace_minutes` pay the flat minimum. Every whole minute past
//! the window adds `per_minute`. Partial minutes are not billed.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Amount of money in cents.
///
/// Serializes as a decimal number of currency units (`750` cents -> `7.5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fee(i64);

impl Fee {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn as_units(self) -> f64 {
        self.0 as f64 / 100.0
    }

    fn saturating_add(self, other: Fee) -> Fee {
        Fee(self.0.saturating_add(other.0))
    }

    fn saturating_mul(self, n: i64) -> Fee {
        Fee(self.0.saturating_mul(n))
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Fee {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_units())
    }
}

impl<'de> Deserialize<'de> for Fee {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let units = f64::deserialize(deserializer)?;
        if !units.is_finite() {
            return Err(serde::de::Error::custom("fee must be a finite number"));
        }
        Ok(Fee((units * 100.0).round() as i64))
    }
}

/// Default flat fee charged for any stay: 5.00
pub const DEFAULT_MINIMUM_FEE_CENTS: i64 = 500;

/// Default length of the flat-fee window
pub const DEFAULT_GRACE_MINUTES: i64 = 30;

/// Default charge per minute past the window: 0.25
pub const DEFAULT_PER_MINUTE_CENTS: i64 = 25;

/// Fee schedule applied on exit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeePolicy {
    pub minimum_fee_cents: i64,
    pub grace_minutes: i64,
    pub per_minute_cents: i64,
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self {
            minimum_fee_cents: DEFAULT_MINIMUM_FEE_CENTS,
            grace_minutes: DEFAULT_GRACE_MINUTES,
            per_minute_cents: DEFAULT_PER_MINUTE_CENTS,
        }
    }
}

impl FeePolicy {
    pub fn minimum_fee(&self) -> Fee {
        Fee::from_cents(self.minimum_fee_cents)
    }

    pub fn per_minute(&self) -> Fee {
        Fee::from_cents(self.per_minute_cents)
    }

    /// Fee for a stay of `minutes` whole minutes.
    pub fn fee_for_minutes(&self, minutes: i64) -> Fee {
        let minutes = minutes.max(0);
        if minutes <= self.grace_minutes {
            return self.minimum_fee();
        }
        let extra = minutes - self.grace_minutes;
        self.minimum_fee()
            .saturating_add(self.per_minute().saturating_mul(extra))
    }

    /// Fee for a stay from `entry` to `exit`.
    ///
    /// An exit earlier than the entry (clock skew) is billed as zero minutes.
    pub fn fee_for(&self, entry: DateTime<Utc>, exit: DateTime<Utc>) -> Fee {
        self.fee_for_minutes((exit - entry).num_minutes())
    }

    /// Reject schedules that would produce negative charges.
    pub fn validate(&self) -> Result<(), String> {
        if self.minimum_fee_cents < 0 {
            return Err("fees.minimum_fee_cents must not be negative".into());
        }
        if self.grace_minutes < 0 {
            return Err("fees.grace_minutes must not be negative".into());
        }
        if self.per_minute_cents < 0 {
            return Err("fees.per_minute_cents must not be negative".into());
        }
        Ok(())
    }
}
