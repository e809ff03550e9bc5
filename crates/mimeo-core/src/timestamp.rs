//! Date/time instants.
//!
//! A [`Timestamp`] stores milliseconds since the Unix epoch as an `f64`,
//! with NaN representing an invalid instant. The stored instant is mutable
//! in place, so two handles to one timestamp observe each other's updates.

use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::RwLock;

/// A mutable date/time instant.
#[derive(Default)]
pub struct Timestamp {
    millis: RwLock<f64>,
}

impl Timestamp {
    /// Create a timestamp from milliseconds since the Unix epoch.
    ///
    /// Non-finite input produces an invalid instant.
    pub fn from_millis(millis: f64) -> Self {
        Self {
            millis: RwLock::new(if millis.is_finite() { millis } else { f64::NAN }),
        }
    }

    /// Create a timestamp holding the current instant.
    pub fn now() -> Self {
        Self::from_millis(Utc::now().timestamp_millis() as f64)
    }

    /// Milliseconds since the Unix epoch, NaN if invalid.
    pub fn millis(&self) -> f64 {
        *self.millis.read()
    }

    /// Replace the stored instant.
    pub fn set_millis(&self, millis: f64) {
        *self.millis.write() = if millis.is_finite() { millis } else { f64::NAN };
    }

    /// Check if this timestamp holds a representable instant.
    pub fn is_valid(&self) -> bool {
        self.millis().is_finite()
    }

    /// Convert to a UTC datetime, `None` if invalid or out of range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let millis = self.millis();
        if !millis.is_finite() {
            return None;
        }
        DateTime::from_timestamp_millis(millis as i64)
    }

    /// RFC 3339 rendering with millisecond precision, `None` if invalid.
    pub fn to_rfc3339(&self) -> Option<String> {
        self.to_datetime()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl std::fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_rfc3339() {
            Some(text) => write!(f, "Timestamp({text})"),
            None => write!(f, "Timestamp(invalid)"),
        }
    }
}
